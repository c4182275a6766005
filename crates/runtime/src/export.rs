use std::io::{self, Write};

use core_sim::EquityPoint;

pub const EQUITY_CSV_HEADER: &str = "index,equity,drawdown\n";

pub struct EquityCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> EquityCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(EQUITY_CSV_HEADER.as_bytes())
    }

    pub fn append_points(&mut self, points: &[EquityPoint]) -> io::Result<()> {
        for point in points {
            writeln!(
                self.writer,
                "{},{},{}",
                point.index, point.equity, point.drawdown
            )?;
        }
        Ok(())
    }

    /// Header, every point, then a flush.
    pub fn write_curve(&mut self, points: &[EquityPoint]) -> io::Result<()> {
        self.write_header()?;
        self.append_points(points)?;
        self.writer.flush()
    }
}
