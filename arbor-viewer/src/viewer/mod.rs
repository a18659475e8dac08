pub mod app;
pub mod source;
pub mod ui;
#[allow(clippy::module_inception)]
pub mod viewer;

#[cfg(test)]
pub mod tests;
