/// Shared value types and the CPU preview rasterizer.

pub mod preview;
pub mod types;
