//! **composer-autoloading** - CLI for toggling Composer-based autoloading rules
//!
//! Enables or disables a PSR-0/PSR-4 autoloading rule for a named module in a
//! modular PHP application's `composer.json`, relocating the legacy
//! `Module.php` bootstrap into the source tree when needed, and re-running
//! `composer dump-autoload` after every actual mutation.

/// Argument grammar: actions, flags, and the per-invocation options
pub mod cli;

/// Invocation state machine: help, preflight, execute, report, exit codes
pub mod dispatch;

/// Usage text template and rendering
pub mod help;

/// Core manifest mutation logic
pub mod core {
    /// Autoload style autodetection from the module directory layout
    pub mod detect;
    pub use detect::{Undeterminable, detect};

    /// Ordered `composer.json` document with autoload-subtree accessors
    pub mod manifest;
    pub use manifest::{Manifest, ManifestError};

    /// Enable/disable operations composing the pieces end to end
    pub mod ops;
    pub use ops::{EnableOutcome, enable, disable};

    /// Legacy `Module.php` relocation into the src/ tree
    pub mod relocate;
    pub use relocate::{MovedClassFile, relocate};

    /// Autoload rule editing (insert/remove with empty-parent pruning)
    pub mod rules;
    pub use rules::Style;
}

/// Infrastructure - subprocess and console boundaries
pub mod infra {
    /// Composer subprocess runner behind the `CommandRunner` capability
    pub mod composer;
    pub use composer::{CommandRunner, Composer};

    /// Two-sink console writer with `<info>`/`<error>` markup
    pub mod console;
    pub use console::Console;
}

// Strategic re-exports for the binary and tests
pub use cli::{Action, Options, Parsed};
pub use crate::core::{Manifest, ManifestError, Style};
pub use infra::{CommandRunner, Composer, Console};
