use colored::Colorize;
use spotty_cloud::OutputWriter;

/// Progress channel printing to stdout.
pub struct ConsoleOutput;

impl OutputWriter for ConsoleOutput {
    fn write(&self, message: &str) {
        if message.starts_with("Stack status:") {
            println!("{}", message.dimmed());
        } else {
            println!("{}", message);
        }
    }
}
