// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain enums and traits describing a super-resolution run.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// The clap/serde derives on the enums are the only outside
// concerns allowed in, so the CLI and the persisted config can
// share one definition of each choice.

// Colour-channel representation of the imagery
pub mod band_mode;

// The five named augmentation strategies
pub mod aug_mode;

// Validation cadence (every N epochs / every N iterations)
pub mod trigger;

// Train / validation / test split identifiers
pub mod split;

// Accelerator vs. CPU selection
pub mod device;

// Configuration precondition failures
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
