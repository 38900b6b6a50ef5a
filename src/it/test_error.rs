use {
    crate::utils::errorfmt::ErrorFmt,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
    },
};

pub type TestResult<T = ()> = Result<T, TestError>;

pub struct TestError {
    error: Box<dyn Error + 'static>,
    context: Vec<String>,
}

impl TestError {
    pub fn new<D: Display>(d: D) -> Self {
        Self {
            error: Box::new(Message(d.to_string())),
            context: vec![],
        }
    }

    pub fn context<D: Display>(mut self, d: D) -> Self {
        self.context.push(d.to_string());
        self
    }
}

#[derive(Debug)]
struct Message(String);

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Message {}

impl Debug for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for context in self.context.iter().rev() {
            write!(f, "{}: ", context)?;
        }
        ErrorFmt(&*self.error).fmt(f)
    }
}

impl<T: Error + 'static> From<T> for TestError {
    fn from(error: T) -> Self {
        Self {
            error: Box::new(error),
            context: vec![],
        }
    }
}

pub trait TestErrorExt<T> {
    fn with_context<D: Display, F: FnOnce() -> D>(self, f: F) -> TestResult<T>;
}

impl<T, E: Into<TestError>> TestErrorExt<T> for Result<T, E> {
    fn with_context<D: Display, F: FnOnce() -> D>(self, f: F) -> TestResult<T> {
        self.map_err(|e| e.into().context(f()))
    }
}

macro_rules! bail {
    ($($tt:tt)*) => {{
        let msg = format!($($tt)*);
        return Err(crate::it::test_error::TestError::new(msg));
    }}
}
