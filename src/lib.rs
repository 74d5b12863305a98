//! EcoSegrega library exports for testing

use clap::ValueEnum;

pub mod camera;
pub mod core;
pub mod sim;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the simulated camera driver answers an access request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CameraAccess {
    /// Grant access after a short permission-prompt delay.
    #[default]
    Auto,
    /// Refuse access, as if the user denied the permission prompt.
    Denied,
}
