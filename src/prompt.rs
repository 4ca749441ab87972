use std::io::{self, BufRead, Write};

use crate::manifest::Route;

/// Confirms routes before they are written.
pub trait Confirm {
    fn confirm(&mut self, route: &Route) -> io::Result<bool>;
}

impl<C> Confirm for &'_ mut C
where
    C: Confirm + ?Sized,
{
    fn confirm(&mut self, route: &Route) -> io::Result<bool> {
        (**self).confirm(route)
    }
}

/// Confirms every route without prompting.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

impl Confirm for Always {
    fn confirm(&mut self, _: &Route) -> io::Result<bool> {
        Ok(true)
    }
}

/// Prompts for each route and reads a line of input in response.
///
/// A route is confirmed if and only if the line begins with `y` or `Y`. Empty
/// lines and the end of input decline the route.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R, W> LinePrompt<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        let LinePrompt { input, output } = self;
        (input, output)
    }
}

impl<R, W> Confirm for LinePrompt<R, W>
where
    R: BufRead,
    W: Write,
{
    fn confirm(&mut self, route: &Route) -> io::Result<bool> {
        writeln!(self.output, "{}", route)?;
        write!(self.output, "y/n: ")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

pub fn is_affirmative(response: &str) -> bool {
    response
        .chars()
        .next()
        .map_or(false, |first| first.eq_ignore_ascii_case(&'y'))
}
