pub mod apply;
pub mod check;
pub mod closure;
pub mod emit;
pub mod table_loader;
