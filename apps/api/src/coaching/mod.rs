// Interview coaching: question catalog, prompt construction, model calls and
// response parsing. All model calls go through the `TextGenerator` trait.

pub mod catalog;
pub mod coach;
pub mod handlers;
pub mod parser;
pub mod prompts;
