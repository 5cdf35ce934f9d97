pub mod candle;
pub mod price;
pub mod signals;

pub use candle::*;
pub use price::*;
pub use signals::*;
