// Filesystem steps of the pipeline
pub mod validator;
pub mod scanner;
pub mod remover;
pub mod renamer;
