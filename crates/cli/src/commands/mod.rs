pub(crate) mod books;
pub(crate) mod repl;
pub(crate) mod resolve;
