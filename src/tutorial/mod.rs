mod formatter;

pub use formatter::TutorialFormatter;
