// Output — terminal display and file exports.

pub mod export;
pub mod terminal;
