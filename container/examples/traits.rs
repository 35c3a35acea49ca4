use fibre_container::{resolve_in, Activation, Container, Key, ResolveError};
use std::convert::Infallible;
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let container = Container::new();

  // --- Registration ---

  // The container stores the Arc<dyn Logger> itself and serves it as such.
  container
    .register_trait([Key::of::<dyn Logger>()], Activation::Lazy, |_| {
      Ok::<_, Infallible>(Arc::new(ConsoleLogger) as Arc<dyn Logger>)
    })
    .unwrap();

  // The constructor resolves its own dependency from the container it is given.
  container
    .register_type(Activation::Lazy, |c| {
      Ok::<_, ResolveError>(ReportService {
        logger: c.resolve::<dyn Logger>()?,
      })
    })
    .unwrap();

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve_in!(container, ReportService);

  println!("Using the service...");
  report_service.generate_report();
}
