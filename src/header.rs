//! C header emitters.
//!
//! Each sound becomes one translation unit holding the PWM table and its
//! length. The index header pulls in a fixed set of numbered sounds.

use crate::pwm::{PwmValue, PWM_MAX};
use std::fmt::Write;
use std::ops::RangeInclusive;
use std::path::Path;

/// Number of table values per line of generated C.
pub const VALUES_PER_LINE: usize = 8;

/// File name of the index header.
pub const INDEX_FILE_NAME: &str = "sounds.h";

/// Sound numbers listed by the index header.
///
/// Fixed to `sound_01.h`..`sound_12.h` for the twelve button sounds, whatever
/// was found in the sounds directory.
pub const INDEX_ENTRIES: RangeInclusive<u8> = 1..=12;

/// Names derived from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundHeader {
    /// Input file name, e.g. `01.mp3`.
    pub source_name: String,
    /// Input file name without its extension, e.g. `01`.
    pub base_name: String,
}

impl SoundHeader {
    /// * 'source_name' - File name of the input, without directories.
    pub fn new(source_name: &str) -> Self {
        let base_name = Path::new(source_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        SoundHeader {
            source_name: source_name.to_owned(),
            base_name,
        }
    }

    /// `sound_<base>.h`
    pub fn file_name(&self) -> String {
        format!("sound_{}.h", self.base_name)
    }

    /// `sound_<base>_data`
    pub fn array_name(&self) -> String {
        format!("sound_{}_data", self.base_name)
    }

    /// `sound_<base>_size`
    pub fn size_name(&self) -> String {
        format!("sound_{}_size", self.base_name)
    }

    /// `SOUND_<BASE>_H`
    pub fn guard(&self) -> String {
        format!("SOUND_{}_H", self.base_name.to_uppercase())
    }

    /// Render the header text for `values`.
    pub fn render(&self, values: &[PwmValue]) -> String {
        let array = self.array_name();
        let size = self.size_name();
        let guard = self.guard();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "// Auto-generated from {}", self.source_name);
        let _ = writeln!(out, "// 22kHz PWM values (0-{PWM_MAX})");
        out.push('\n');
        let _ = writeln!(out, "#ifndef {guard}");
        let _ = writeln!(out, "#define {guard}");
        out.push('\n');
        out.push_str("#include <stddef.h>\n\n");
        let _ = writeln!(out, "extern const unsigned short {array}[];");
        let _ = writeln!(out, "extern const size_t {size};");
        out.push('\n');
        let _ = writeln!(out, "const unsigned short {array}[] = {{");
        write_values(&mut out, values);
        out.push_str("};\n\n");
        let _ = writeln!(out, "const size_t {size} = {};", values.len());
        out.push('\n');
        let _ = writeln!(out, "#endif // {guard}");
        out
    }
}

/// Table body: `0x%04x` literals, [`VALUES_PER_LINE`] per line, no trailing comma.
fn write_values(out: &mut String, values: &[PwmValue]) {
    let num_lines = values.len().div_ceil(VALUES_PER_LINE);
    for (i, line) in values.chunks(VALUES_PER_LINE).enumerate() {
        out.push_str("    ");
        for (j, v) in line.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{:#06x}", v.value());
        }
        if i + 1 < num_lines {
            out.push(',');
        }
        out.push('\n');
    }
}

/// Render the index header including every sound in [`INDEX_ENTRIES`].
pub fn render_index() -> String {
    let mut out = String::new();
    out.push_str("// Auto-generated sound files index\n\n");
    out.push_str("#ifndef SOUNDS_H\n");
    out.push_str("#define SOUNDS_H\n\n");
    for n in INDEX_ENTRIES {
        let _ = writeln!(out, "#include \"sound_{n:02}.h\"");
    }
    out.push_str("\n#endif // SOUNDS_H\n");
    out
}
