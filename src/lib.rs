mod charmap;
pub mod emit;

pub use charmap::{CharsetDefinition, ParseError};

/// Parses a charmap and renders both generated artifacts.
///
/// Returns `(header, source)` — the declarations and definitions files for
/// the generated encoding class — or the first range violation found in the
/// charmap. Nothing is rendered on error.
pub fn generate(charmap: &str, class_name: &str) -> Result<(String, String), ParseError> {
    let definition = CharsetDefinition::parse(charmap)?;
    Ok((
        emit::header(&definition, class_name),
        emit::source(&definition, class_name),
    ))
}
