//! Printing observers for the trajectory.

use std::io::{self, Write};
use stepflow_core::container::StateContainer;
use stepflow_core::traits::Observer;

/// Significant digits per table cell.
pub const TABLE_PRECISION: usize = 10;
const COLUMN_WIDTH: usize = 15;
const BANNER_WIDTH: usize = 42;
const RULE_WIDTH: usize = 48;

/// Formats `value` the way C's `%.{precision}g` does: `precision` significant
/// digits, trailing zeros dropped, exponent notation when the decimal exponent
/// is below -4 or at least `precision`.
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to `precision` digits can carry into the exponent (9.99.. -> 1e1),
    // so the exponent is read back from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

fn trim_fraction(digits: &str) -> String {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        digits.to_string()
    }
}

/// Fixed-width, tab-separated table: one row per observation, one right
/// aligned column per state component. Time is not printed.
pub struct TableWriter<W: Write> {
    out: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_banner(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\t{:>width$}", title, width = BANNER_WIDTH)?;
        writeln!(self.out, "\t{}", "=".repeat(RULE_WIDTH))
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W, C> Observer<C> for TableWriter<W>
where
    W: Write,
    C: StateContainer<Value = f64>,
{
    type Error = io::Error;

    fn observe(&mut self, x: &C, _t: f64) -> io::Result<()> {
        for value in x.iter() {
            write!(
                self.out,
                "\t{:>width$}",
                format_general(*value, TABLE_PRECISION),
                width = COLUMN_WIDTH
            )?;
        }
        writeln!(self.out)
    }
}

/// Comma-separated rows of `t` followed by the state components.
pub struct CsvWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    /// Writes the header line `t,<columns...>`.
    pub fn new(mut out: W, columns: &[&str]) -> io::Result<Self> {
        write!(out, "t")?;
        for column in columns {
            write!(out, ",{}", column)?;
        }
        writeln!(out)?;
        Ok(Self { out })
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W, C> Observer<C> for CsvWriter<W>
where
    W: Write,
    C: StateContainer<Value = f64>,
{
    type Error = io::Error;

    fn observe(&mut self, x: &C, t: f64) -> io::Result<()> {
        write!(self.out, "{}", t)?;
        for value in x.iter() {
            write!(self.out, ",{}", value)?;
        }
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_general, CsvWriter, TableWriter};
    use std::io;
    use stepflow_core::traits::Observer;

    #[test]
    fn format_general_matches_printf() {
        let cases = [
            (0.9, "0.9"),
            (0.28, "0.28"),
            (0.0, "0"),
            (-0.5, "-0.5"),
            (100.0, "100"),
            (18.667594378854712, "18.66759438"),
            (-3.118685049161337, "-3.118685049"),
            (1e-5, "1e-05"),
            (0.0001, "0.0001"),
            (0.00012345678912345, "0.0001234567891"),
            (1234567890.0, "1234567890"),
            (123456789012.0, "1.23456789e+11"),
            (9.9999999999, "10"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_general(value, 10), expected, "formatting {value}");
        }
    }

    #[test]
    fn format_general_handles_non_finite_values() {
        assert_eq!(format_general(f64::NAN, 10), "nan");
        assert_eq!(format_general(f64::INFINITY, 10), "inf");
        assert_eq!(format_general(f64::NEG_INFINITY, 10), "-inf");
    }

    #[test]
    fn table_rows_are_tab_separated_fixed_width() {
        let mut table = TableWriter::new(Vec::<u8>::new());
        table
            .observe(&vec![0.9, 0.28, 0.0], 0.0)
            .expect("write to memory");
        let bytes = table.finish().expect("flush");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(text, "\t            0.9\t           0.28\t              0\n");
    }

    #[test]
    fn banner_is_right_aligned_with_rule() {
        let mut table = TableWriter::new(Vec::<u8>::new());
        table
            .write_banner("Euler stepper to solve lorenz system")
            .expect("write to memory");
        let text = String::from_utf8(table.finish().expect("flush")).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\t      Euler stepper to solve lorenz system");
        assert_eq!(lines[1], format!("\t{}", "=".repeat(48)));
    }

    #[test]
    fn csv_rows_lead_with_time() {
        let mut csv = CsvWriter::new(Vec::<u8>::new(), &["x", "y", "z"]).expect("header");
        csv.observe(&[0.9, 0.28, 0.0], 0.0).expect("row");
        csv.observe(&[1.5, -2.0, 3.25], 0.01).expect("row");
        let text = String::from_utf8(csv.finish().expect("flush")).expect("utf8");
        assert_eq!(text, "t,x,y,z\n0,0.9,0.28,0\n0.01,1.5,-2,3.25\n");
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_surface_as_observer_errors() {
        let mut table = TableWriter::new(BrokenPipe);
        let err = table
            .observe(&vec![1.0], 0.0)
            .expect_err("writing should fail");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
