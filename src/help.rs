//! Usage text.

use crate::infra::console::Console;

/// Destination for the usage text: stdout for help requests, stderr when it
/// accompanies an argument or preflight error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Stderr,
}

const TEMPLATE: &str = "\
<info>Usage:</info>

  {command} [command] [options] modulename

<info>Commands:</info>

  <info>help</info>          Display this help/usage message
  <info>enable</info>        Enable composer-based autoloading for the module
  <info>disable</info>       Disable composer-based autoloading for the module

<info>Options:</info>

  <info>--help|-h</info>            Display this help/usage message
  <info>--composer|-c</info>        Specify the path to the composer binary;
                       defaults to \"composer\"
  <info>--type|-t <psr0|psr4></info>    Specify the autoloading type to use;
                       if not provided, attempts to
                       autodetermine the type
  <info>--modules-path|-p</info>    Specify the path to the modules directory;
                       defaults to \"module\"
";

/// Render the usage text with the invoking program name substituted in.
pub fn render(command: &str, console: &Console, sink: Sink) {
    let text = TEMPLATE.replace("{command}", command);
    match sink {
        Sink::Stdout => console.write_line(&text),
        Sink::Stderr => console.write_error_line(&text),
    }
}
