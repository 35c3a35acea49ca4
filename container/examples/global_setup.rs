use fibre_container::{global, resolve, Activation};

struct AppName(&'static str);

fn register_dependencies() -> Result<(), fibre_container::RegisterError> {
  global().register_fn(["app_name"], Activation::Eager, || AppName("fibre demo"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  register_dependencies()?;
  global().bootstrap()?;

  let name = resolve!(AppName, "app_name");
  println!("Running {}", name.0);
  Ok(())
}
