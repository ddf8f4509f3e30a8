mod filter;
mod utils;
