/// The two characters which introduce markup within a template line. The
/// control trigger begins directives like `${if x}`; the variable trigger
/// begins interpolations like `#{name}`. The two are assumed to differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub control: char,
    pub variable: char,
}

impl Config {
    pub fn new(control: char, variable: char) -> Config {
        Config { control, variable }
    }

    /// Is the given character one of the two triggers?
    pub fn is_trigger(&self, c: char) -> bool {
        c == self.control || c == self.variable
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            control: '$',
            variable: '#',
        }
    }
}
