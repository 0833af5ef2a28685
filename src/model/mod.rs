pub mod sequential;
pub mod state;

pub use sequential::Sequential;
