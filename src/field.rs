//! C2: the `Field` primitive — a fixed-width, type-tagged byte-slice with
//! parse/format/convert operations.

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

/// The character-class/encoding a `Field` is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// ASCII text, space-padded right.
    BcsA,
    /// ASCII numeric, zero-padded left.
    BcsN,
    /// Raw bytes, typically a big-endian unsigned integer of width 1/2/4/8.
    Binary,
    /// Stricter character-class validator over `BcsA`.
    BcsAPlus,
    /// Stricter character-class validator over `BcsN`.
    BcsNPlus,
}

impl FieldKind {
    fn pad_byte(self) -> u8 {
        match self {
            FieldKind::BcsA | FieldKind::BcsAPlus => b' ',
            FieldKind::BcsN | FieldKind::BcsNPlus => b'0',
            FieldKind::Binary => 0,
        }
    }

    fn is_text(self) -> bool {
        !matches!(self, FieldKind::Binary)
    }

    fn validate_charset(self, bytes: &[u8]) -> Result<()> {
        let ok = match self {
            FieldKind::BcsA => bytes.iter().all(|&b| (0x20..=0x7E).contains(&b)),
            FieldKind::BcsAPlus => bytes
                .iter()
                .all(|&b| b.is_ascii_alphanumeric() || b == b' ' || b == b'_' || b == b'-'),
            FieldKind::BcsN => bytes.iter().all(|&b| b.is_ascii_digit() || b == b' '),
            FieldKind::BcsNPlus => {
                bytes
                    .iter()
                    .enumerate()
                    .all(|(i, &b)| b.is_ascii_digit() || (i == 0 && (b == b'+' || b == b'-')))
            }
            FieldKind::Binary => true,
        };
        if ok {
            Ok(())
        } else {
            Err(nitf_err(
                NitfErrorKind::Parsing,
                format!("bytes not valid for field kind {:?}", self),
            ))
        }
    }
}

/// A fixed-size byte buffer of length `L`, tagged with a category. A
/// resizable variant (`resizable = true`) exists only during TRE assembly,
/// where the descriptor does not yet know the field's final on-the-wire
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    bytes: Vec<u8>,
    resizable: bool,
}

impl Field {
    pub fn new(kind: FieldKind, length: usize) -> Self {
        Self {
            kind,
            bytes: vec![kind.pad_byte(); length],
            resizable: false,
        }
    }

    pub fn new_resizable(kind: FieldKind) -> Self {
        Self {
            kind,
            bytes: Vec::new(),
            resizable: true,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn length(&self) -> usize {
        self.bytes.len()
    }

    fn max_len(&self) -> usize {
        if self.resizable {
            usize::MAX
        } else {
            self.bytes.len()
        }
    }

    /// Stores exactly `bytes.len()` bytes when `bytes.len() <= L`, else
    /// fails `Parsing`.
    pub fn set_raw(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.max_len() {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!(
                    "{} bytes do not fit in a {}-byte field",
                    bytes.len(),
                    self.bytes.len()
                ),
            ));
        }
        if self.resizable {
            self.bytes = bytes.to_vec();
        } else {
            let pad = self.kind.pad_byte();
            self.bytes.fill(pad);
            self.bytes[..bytes.len()].copy_from_slice(bytes);
        }
        Ok(())
    }

    /// Left-justifies for `BcsA` (right-pads with space), right-justifies
    /// for `BcsN` (left-pads with `'0'`).
    pub fn set_string(&mut self, s: &str) -> Result<()> {
        let s = s.as_bytes();
        if s.len() > self.max_len() {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!("string of {} bytes does not fit field", s.len()),
            ));
        }
        self.kind.validate_charset(s)?;
        let len = if self.resizable { s.len() } else { self.bytes.len() };
        let mut buf = vec![self.kind.pad_byte(); len];
        match self.kind {
            FieldKind::BcsN | FieldKind::BcsNPlus => {
                let start = len - s.len();
                buf[start..].copy_from_slice(s);
            }
            _ => {
                buf[..s.len()].copy_from_slice(s);
            }
        }
        self.bytes = buf;
        Ok(())
    }

    /// Renders decimal into `L` bytes (`BcsN`) or `L`-byte big-endian
    /// (`Binary`); fails `IntegerOverflow` if the rendering exceeds `L`.
    pub fn set_uint(&mut self, v: u64) -> Result<()> {
        match self.kind {
            FieldKind::BcsN | FieldKind::BcsNPlus => {
                let text = v.to_string();
                let len = if self.resizable {
                    text.len()
                } else {
                    self.bytes.len()
                };
                if text.len() > len {
                    return Err(nitf_err(
                        NitfErrorKind::IntegerOverflow,
                        format!("{v} does not fit in {len} decimal digits"),
                    ));
                }
                self.set_string(&text)
            }
            FieldKind::Binary => {
                let len = if self.resizable { 8 } else { self.bytes.len() };
                let full = v.to_be_bytes();
                if len > full.len() {
                    return Err(nitf_err(
                        NitfErrorKind::IntegerOverflow,
                        "binary field wider than u64",
                    ));
                }
                let needed = &full[full.len() - len..];
                if len < full.len() && full[..full.len() - len].iter().any(|&b| b != 0) {
                    return Err(nitf_err(
                        NitfErrorKind::IntegerOverflow,
                        format!("{v} does not fit in a {len}-byte binary field"),
                    ));
                }
                self.resizable_set_raw_binary(needed)
            }
            _ => Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "set_uint only applies to BCS-N or Binary fields",
            )),
        }
    }

    fn resizable_set_raw_binary(&mut self, bytes: &[u8]) -> Result<()> {
        if self.resizable {
            self.bytes = bytes.to_vec();
            Ok(())
        } else {
            self.bytes.copy_from_slice(bytes);
            Ok(())
        }
    }

    pub fn set_int(&mut self, v: i64) -> Result<()> {
        if v >= 0 {
            return self.set_uint(v as u64);
        }
        match self.kind {
            FieldKind::BcsNPlus => self.set_string(&v.to_string()),
            FieldKind::Binary => {
                let len = if self.resizable { 8 } else { self.bytes.len() };
                let full = v.to_be_bytes();
                let needed = &full[full.len() - len..];
                self.resizable_set_raw_binary(needed)
            }
            _ => Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "negative values require BCS-N+ or Binary",
            )),
        }
    }

    /// `%e`/`%f`-style rendering with width `L`; rejects a leading `+` when
    /// `allow_plus` is false. Fractional digits are
    /// `L - sign_width - 1 - decimal_point_width`.
    pub fn set_real(&mut self, v: f64, format: RealFormat, allow_plus: bool) -> Result<()> {
        if !matches!(self.kind, FieldKind::BcsA | FieldKind::BcsAPlus | FieldKind::BcsN) {
            return Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "set_real requires a text field",
            ));
        }
        let len = if self.resizable {
            return Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "set_real requires a fixed-width field",
            ));
        } else {
            self.bytes.len()
        };
        let sign_width = if v.is_sign_negative() || allow_plus { 1 } else { 0 };
        let sign = if v.is_sign_negative() {
            "-"
        } else if allow_plus {
            "+"
        } else {
            ""
        };
        let rendered = match format {
            RealFormat::Fixed => {
                let decimal_point_width = 1;
                let frac_digits = len
                    .checked_sub(sign_width + 1 + decimal_point_width)
                    .ok_or_else(|| {
                        nitf_err(NitfErrorKind::IntegerOverflow, "field too narrow for real")
                    })?;
                format!("{sign}{:.*}", frac_digits, v.abs())
            }
            RealFormat::Exp => {
                let frac_digits = len.saturating_sub(sign_width + 6);
                format!("{sign}{:.*e}", frac_digits, v.abs())
            }
        };
        if rendered.len() > len {
            return Err(nitf_err(
                NitfErrorKind::IntegerOverflow,
                format!("rendered real `{rendered}` does not fit {len} bytes"),
            ));
        }
        let padded = format!("{:0>width$}", rendered, width = len);
        self.bytes.copy_from_slice(padded.as_bytes());
        Ok(())
    }

    pub fn set_datetime(&mut self, dt: &NitfDateTime, format: &str) -> Result<()> {
        self.set_string(&dt.format(format))
    }

    pub fn as_string(&self) -> Result<String> {
        let s = std::str::from_utf8(&self.bytes)
            .map_err(|e| nitf_err(NitfErrorKind::Parsing, e.to_string()))?;
        Ok(match self.kind {
            FieldKind::BcsA | FieldKind::BcsAPlus => s.trim_end().to_string(),
            FieldKind::BcsN | FieldKind::BcsNPlus => s.trim_start().to_string(),
            FieldKind::Binary => {
                return Err(nitf_err(
                    NitfErrorKind::InvalidObject,
                    "as_string does not apply to Binary fields",
                ))
            }
        })
    }

    pub fn as_uint(&self) -> Result<u64> {
        match self.kind {
            FieldKind::BcsN | FieldKind::BcsNPlus => {
                let s = self.as_string()?;
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed
                    .parse()
                    .map_err(|_| nitf_err(NitfErrorKind::Parsing, format!("not numeric: {trimmed}")))
            }
            FieldKind::Binary => {
                let mut acc = 0u64;
                for &b in &self.bytes {
                    acc = (acc << 8) | u64::from(b);
                }
                Ok(acc)
            }
            _ => Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "as_uint only applies to BCS-N or Binary fields",
            )),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        let s = self.as_string()?;
        let trimmed = s.trim();
        trimmed
            .parse()
            .map_err(|_| nitf_err(NitfErrorKind::Parsing, format!("not an integer: {trimmed}")))
    }

    pub fn as_real(&self) -> Result<f64> {
        let s = self.as_string()?;
        let trimmed = s.trim();
        trimmed
            .parse()
            .map_err(|_| nitf_err(NitfErrorKind::Parsing, format!("not a real number: {trimmed}")))
    }

    /// Copies exactly `min(L, buf.len())` bytes.
    pub fn as_raw(&self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        n
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_datetime(&self, format: &str) -> Result<NitfDateTime> {
        NitfDateTime::parse(&self.as_string()?, format)
    }

    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RealFormat {
    Fixed,
    Exp,
}

/// A minimal strftime-like datetime, sufficient for the NITF-specific
/// `"%Y%m%d%H%M%S"` format used by file datetimes and
/// for the handful of date fields the product layer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NitfDateTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl NitfDateTime {
    pub fn format(&self, fmt: &str) -> String {
        let mut out = String::new();
        let mut chars = fmt.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '%' {
                match chars.next() {
                    Some('Y') => out.push_str(&format!("{:04}", self.year)),
                    Some('m') => out.push_str(&format!("{:02}", self.month)),
                    Some('d') => out.push_str(&format!("{:02}", self.day)),
                    Some('H') => out.push_str(&format!("{:02}", self.hour)),
                    Some('M') => out.push_str(&format!("{:02}", self.minute)),
                    Some('S') => out.push_str(&format!("{:02}", self.second)),
                    Some(other) => {
                        out.push('%');
                        out.push(other);
                    }
                    None => out.push('%'),
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    pub fn parse(text: &str, fmt: &str) -> Result<Self> {
        let mut year = 0;
        let mut month = 0;
        let mut day = 0;
        let mut hour = 0;
        let mut minute = 0;
        let mut second = 0;

        let mut text_chars = text.chars().peekable();
        let mut fmt_chars = fmt.chars().peekable();
        while let Some(fc) = fmt_chars.next() {
            if fc == '%' {
                let spec = fmt_chars
                    .next()
                    .ok_or_else(|| nitf_err(NitfErrorKind::Parsing, "dangling % in format"))?;
                let width = if spec == 'Y' { 4 } else { 2 };
                let mut digits = String::new();
                for _ in 0..width {
                    match text_chars.next() {
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => {
                            return Err(nitf_err(
                                NitfErrorKind::Parsing,
                                format!("expected {width} digits for %{spec}"),
                            ))
                        }
                    }
                }
                let value: u32 = digits.parse().unwrap();
                match spec {
                    'Y' => year = value,
                    'm' => month = value,
                    'd' => day = value,
                    'H' => hour = value,
                    'M' => minute = value,
                    'S' => second = value,
                    other => {
                        return Err(nitf_err(
                            NitfErrorKind::Parsing,
                            format!("unsupported format specifier %{other}"),
                        ))
                    }
                }
            } else {
                match text_chars.next() {
                    Some(c) if c == fc => {}
                    _ => {
                        return Err(nitf_err(
                            NitfErrorKind::Parsing,
                            "literal format text did not match input",
                        ))
                    }
                }
            }
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bcsa_set_string_pads_right_with_space() {
        let mut f = Field::new(FieldKind::BcsA, 8);
        f.set_string("ABC").unwrap();
        assert_eq!(f.as_bytes(), b"ABC     ");
        assert_eq!(f.as_string().unwrap(), "ABC");
    }

    #[test]
    fn bcsn_set_string_pads_left_with_zero() {
        let mut f = Field::new(FieldKind::BcsN, 5);
        f.set_string("42").unwrap();
        assert_eq!(f.as_bytes(), b"00042");
    }

    #[rstest]
    #[case(0u64)]
    #[case(42)]
    #[case(999_999)]
    fn bcsn_uint_round_trips(#[case] value: u64) {
        let mut f = Field::new(FieldKind::BcsN, 6);
        f.set_uint(value).unwrap();
        assert_eq!(f.as_uint().unwrap(), value);
    }

    #[rstest]
    #[case(0u64, 1)]
    #[case(255, 1)]
    #[case(65535, 2)]
    #[case(u32::MAX as u64, 4)]
    fn binary_uint_round_trips(#[case] value: u64, #[case] width: usize) {
        let mut f = Field::new(FieldKind::Binary, width);
        f.set_uint(value).unwrap();
        assert_eq!(f.as_uint().unwrap(), value);
    }

    #[test]
    fn set_string_too_long_fails_parsing() {
        let mut f = Field::new(FieldKind::BcsA, 3);
        let err = f.set_string("ABCD").unwrap_err();
        let kind = err.downcast_ref::<crate::NitfError>().unwrap().kind;
        assert_eq!(kind, NitfErrorKind::Parsing);
    }

    #[test]
    fn set_uint_overflow_fails_integer_overflow() {
        let mut f = Field::new(FieldKind::BcsN, 2);
        let err = f.set_uint(1000).unwrap_err();
        let kind = err.downcast_ref::<crate::NitfError>().unwrap().kind;
        assert_eq!(kind, NitfErrorKind::IntegerOverflow);
    }

    #[test]
    fn datetime_round_trips_nitf_format() {
        let mut f = Field::new(FieldKind::BcsN, 14);
        let dt = NitfDateTime {
            year: 2024,
            month: 3,
            day: 7,
            hour: 13,
            minute: 5,
            second: 9,
        };
        f.set_datetime(&dt, "%Y%m%d%H%M%S").unwrap();
        assert_eq!(f.as_string().unwrap(), "20240307130509");
        let parsed = f.as_datetime("%Y%m%d%H%M%S").unwrap();
        assert_eq!(parsed, dt);
    }

    #[test]
    fn real_fixed_round_trips_within_precision() {
        let mut f = Field::new(FieldKind::BcsN, 8);
        f.set_real(12.5, RealFormat::Fixed, false).unwrap();
        let parsed = f.as_real().unwrap();
        assert!((parsed - 12.5).abs() < 1e-6);
    }

    #[test]
    fn resizable_field_grows_to_assigned_length() {
        let mut f = Field::new_resizable(FieldKind::BcsA);
        f.set_string("AXISNAME").unwrap();
        assert_eq!(f.length(), 8);
    }
}
