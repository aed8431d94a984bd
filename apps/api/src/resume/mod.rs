pub mod analysis;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod upload;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
