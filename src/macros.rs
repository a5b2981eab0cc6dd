// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literal, const or var
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

// Lazily compiled, crate-private regex static.
// Patterns are literals, so a compile failure is a programming error.
macro_rules! lazy_regex {
    ($vis:vis $name:ident = $pat:expr) => {
        $vis static $name: ::std::sync::LazyLock<::regex::Regex> =
            ::std::sync::LazyLock::new(|| {
                ::regex::Regex::new($pat).expect(concat!("bad regex: ", stringify!($name)))
            });
    };
}
