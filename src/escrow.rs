//! Biometric escrow — the platform prompt collaborator.
//!
//! The core never talks to TouchID / fingerprint APIs itself; it asks a
//! `BiometricEscrow` whether the hardware is usable and whether the
//! user passed a challenge.  Cancellation and timeouts at the platform
//! boundary must surface as a failed challenge, never a panic — a
//! failed challenge simply sends the caller back to password entry.

/// Platform biometric capability and challenge interface.
pub trait BiometricEscrow: Send {
    /// True if the device has biometric hardware at all.
    fn hardware_available(&self) -> bool;

    /// True if the user has enrolled (fingerprints/face registered).
    fn enrolled(&self) -> bool;

    /// Show the platform prompt and return whether the user passed.
    ///
    /// Cancellation or timeout is `false`.
    fn challenge(&self, prompt: &str) -> bool;
}

/// A biometric backend for platforms without one.  Answers no to
/// everything, so biometric unlock reports `BiometricUnavailable` and
/// the caller stays on the password path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBiometric;

impl BiometricEscrow for NoBiometric {
    fn hardware_available(&self) -> bool {
        false
    }

    fn enrolled(&self) -> bool {
        false
    }

    fn challenge(&self, _prompt: &str) -> bool {
        false
    }
}
