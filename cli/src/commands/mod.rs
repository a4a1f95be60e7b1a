pub mod populate;
pub mod rake;
pub mod topline;
