use iu_core::ports::NotifierPort;

/// Prints alerts to stderr so they stay visible next to command output.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl NotifierPort for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}
