use crate::code128::Code128;
use crate::error::Result;

/*---- Utilities ----*/

/// Converts an encoding into one boolean per module, `true` for a bar.
pub fn booleans(encoding: &str) -> Vec<bool> {
    encoding.bytes().map(|module| module == b'1').collect()
}

/// Collects continuous bars and spaces into `(is_bar, width)` runs.
///
/// # Example
///
/// ```rust
/// use barust::helper::bar_groups;
///
/// assert_eq!(bar_groups("1101"), [(true, 2), (false, 1), (true, 1)]);
/// ```
pub fn bar_groups(encoding: &str) -> Vec<(bool, usize)> {
    let mut groups: Vec<(bool, usize)> = Vec::new();
    for bar in booleans(encoding) {
        match groups.last_mut() {
            Some((last, width)) if *last == bar => *width += 1,
            _ => groups.push((bar, 1)),
        }
    }
    groups
}

/// Turns a finished encoding into some output.
///
/// Renderers only see the flat module string, never subsets or checksums.
/// Code 128 is one-dimensional, so there is a single row and no 2-D flag.
pub trait Renderer {
    fn render(&self, encoding: &str) -> String;
}

/// Layout of [`TextRenderer`] output.
#[derive(Clone, Debug)]
pub struct TextOptions {
    /// Number of identical lines to print.
    pub height: usize,
    /// Light modules on each side of the symbol.
    pub quiet_zone: usize,
    pub bar: char,
    pub space: char,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            height: 8,
            quiet_zone: 10,
            bar: '█',
            space: ' ',
        }
    }
}

/// Draws an encoding as lines of text, one character per module.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    options: TextOptions,
}

impl TextRenderer {
    pub fn new(options: TextOptions) -> Self {
        TextRenderer { options }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, encoding: &str) -> String {
        let TextOptions { height, quiet_zone, bar, space } = self.options;
        let margin: String = core::iter::repeat(space).take(quiet_zone).collect();

        let mut line = margin.clone();
        for (is_bar, width) in bar_groups(encoding) {
            let module = if is_bar { bar } else { space };
            line.extend(core::iter::repeat(module).take(width));
        }
        line += &margin;
        line.push('\n');
        line.repeat(height)
    }
}

/// Prints the given Code 128 symbol to the console.
pub fn print_barcode(code: &Code128) -> Result<()> {
    print!("{}", TextRenderer::default().render(code.encoding()?));
    println!("{}", code);
    Ok(())
}

/// Generates a text drawing of a Code 128 symbol for the provided content,
/// choosing subsets automatically.
///
/// # Example
///
/// ```
/// use barust::helper::generate_text;
///
/// let text = generate_text("Hello, World!").unwrap();
/// println!("{}", text);
/// ```
pub fn generate_text(content: impl AsRef<[u8]>) -> Result<String> {
    let code = Code128::new(content)?;
    Ok(TextRenderer::default().render(code.encoding()?))
}
