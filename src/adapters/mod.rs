pub mod eis;
