// SPDX-License-Identifier: GPL-2.0-or-later
//! Line source for clippings logs

use std::io::BufRead;

/// Width of the byte-order marker the device writes in front of the file
const BOM_WIDTH: usize = 3;

/// Iterator over the chomped lines of a clippings log.
///
/// The very first line loses its first three bytes whatever they are; the
/// device always starts the file with a UTF-8 BOM. Trailing `\r\n`, `\n` or
/// `\r` is removed and invalid UTF-8 is replaced.
pub struct LineSource<R> {
    reader: R,
    index: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            index: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut line: &[u8] = &self.buf;
                if self.index == 0 {
                    line = &line[BOM_WIDTH.min(line.len())..];
                }
                self.index += 1;
                Some(Ok(String::from_utf8_lossy(chomp(line)).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn chomp(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
