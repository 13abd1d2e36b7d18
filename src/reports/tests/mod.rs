mod common;
mod norms;
