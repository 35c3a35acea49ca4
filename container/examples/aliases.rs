use fibre_container::{Activation, Container, Key};
use std::sync::Arc;

struct DatabaseConfig {
  url: String,
}

#[derive(Debug, Hash)]
enum Env {
  Primary,
  Replica,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let container = Container::new();

  // One registration reachable through several keys.
  container.register_fn(
    [Key::new(Env::Primary), Key::from("db"), Key::of::<DatabaseConfig>()],
    Activation::Lazy,
    || DatabaseConfig {
      url: "postgres://primary".to_string(),
    },
  )?;
  container.register_fn([Key::new(Env::Replica)], Activation::Lazy, || DatabaseConfig {
    url: "postgres://replica".to_string(),
  })?;

  // Aliases can also be added afterwards; they always point at the root key.
  container.register_alias("database", "db", false)?;

  let primary = container.resolve_key::<DatabaseConfig>(Key::new(Env::Primary))?;
  let via_alias = container.resolve_key::<DatabaseConfig>("database")?;
  let replica = container.resolve_key::<DatabaseConfig>(Key::new(Env::Replica))?;

  println!("Primary: {}", primary.url);
  println!("Replica: {}", replica.url);
  assert!(Arc::ptr_eq(&primary, &via_alias));
  assert!(Arc::ptr_eq(&primary, &container.resolve::<DatabaseConfig>()?));
  Ok(())
}
