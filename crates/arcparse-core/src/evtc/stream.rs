//! Random-access reader over the combat event array.
//!
//! Events are never loaded as a whole. Random access and directional scans
//! seek to one record at a time and decode it from a single reused buffer;
//! a sweep reads blocks of records into one reused block buffer instead.

use std::io::{Read, Seek};
use tracing::trace;

use crate::error::Result;
use crate::evtc::event::CombatEvent;
use crate::evtc::layout::{Layout, MAX_EVENT_SIZE};
use crate::source::LogSource;

/// Records read per block during a sweep.
pub const SWEEP_BLOCK_RECORDS: u64 = 1024;

pub struct EventStream<'a, R> {
    source: &'a mut LogSource<R>,
    layout: &'a Layout,
    buf: [u8; MAX_EVENT_SIZE],
}

impl<'a, R: Read + Seek> EventStream<'a, R> {
    pub fn new(source: &'a mut LogSource<R>, layout: &'a Layout) -> Self {
        Self {
            source,
            layout,
            buf: [0u8; MAX_EVENT_SIZE],
        }
    }

    /// Number of events in the log.
    pub fn len(&self) -> u64 {
        self.layout.event_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode event `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn event(&mut self, index: u64) -> Result<CombatEvent> {
        assert!(
            index < self.len(),
            "event index {index} out of range ({} events)",
            self.len()
        );
        let revision = self.layout.revision;
        let record = &mut self.buf[..revision.event_size() as usize];
        self.source
            .read_exact_at(self.layout.event_offset(index), record)?;
        CombatEvent::decode(revision, record)
    }

    /// The last event in the log, if any.
    pub fn last(&mut self) -> Result<Option<CombatEvent>> {
        match self.len() {
            0 => Ok(None),
            n => self.event(n - 1).map(Some),
        }
    }

    /// Visit every event from first to last.
    pub fn sweep<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&CombatEvent),
    {
        let revision = self.layout.revision;
        let record_size = revision.event_size() as usize;
        let mut block = Vec::new();
        let mut index = 0;

        while index < self.len() {
            let count = SWEEP_BLOCK_RECORDS.min(self.len() - index);
            block.resize(count as usize * record_size, 0);
            self.source
                .read_exact_at(self.layout.event_offset(index), &mut block)?;

            for record in block.chunks_exact(record_size) {
                visit(&CombatEvent::decode(revision, record)?);
            }
            index += count;
        }
        Ok(())
    }

    /// Scan from the first event, stopping at the first one `matches` accepts.
    pub fn find_forward<F>(&mut self, matches: F) -> Result<Option<u64>>
    where
        F: FnMut(&CombatEvent) -> bool,
    {
        self.find_in(0..self.len(), matches)
    }

    /// Scan from the last event, stopping at the first one `matches` accepts.
    pub fn find_backward<F>(&mut self, matches: F) -> Result<Option<u64>>
    where
        F: FnMut(&CombatEvent) -> bool,
    {
        self.find_in((0..self.len()).rev(), matches)
    }

    fn find_in<I, F>(&mut self, indices: I, mut matches: F) -> Result<Option<u64>>
    where
        I: Iterator<Item = u64>,
        F: FnMut(&CombatEvent) -> bool,
    {
        for index in indices {
            let event = self.event(index)?;
            if matches(&event) {
                trace!("Scan matched event #{} (statechange {})", index, event.statechange);
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evtc::layout::Revision;
    use std::cell::Cell;
    use std::io::{Cursor, SeekFrom};
    use std::rc::Rc;

    /// Counts every byte pulled through `read`.
    struct CountingReader<R> {
        inner: R,
        pulled: Rc<Cell<u64>>,
    }

    impl<R: Read> Read for CountingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.pulled.set(self.pulled.get() + n as u64);
            Ok(n)
        }
    }

    impl<R: Seek> Seek for CountingReader<R> {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// A file holding only an event array: zero agents, zero skills.
    fn event_file(times: impl IntoIterator<Item = u64>) -> Vec<u8> {
        let mut data = vec![0u8; 16];
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        for time in times {
            let mut record = [0u8; 64];
            record[..8].copy_from_slice(&time.to_le_bytes());
            data.extend_from_slice(&record);
        }
        data
    }

    fn stream_fixture(times: &[u64]) -> (LogSource<Cursor<Vec<u8>>>, Layout) {
        let mut source = LogSource::new(Cursor::new(event_file(times.iter().copied()))).unwrap();
        let layout = Layout::resolve(&mut source, Revision::V1).unwrap();
        (source, layout)
    }

    fn counting_fixture(
        count: u64,
    ) -> (LogSource<CountingReader<Cursor<Vec<u8>>>>, Layout, Rc<Cell<u64>>) {
        let pulled = Rc::new(Cell::new(0));
        let reader = CountingReader {
            inner: Cursor::new(event_file(0..count)),
            pulled: Rc::clone(&pulled),
        };
        let mut source = LogSource::new(reader).unwrap();
        let layout = Layout::resolve(&mut source, Revision::V1).unwrap();
        pulled.set(0);
        (source, layout, pulled)
    }

    #[test]
    fn test_random_access() {
        let (mut source, layout) = stream_fixture(&[10, 20, 30]);
        let mut stream = EventStream::new(&mut source, &layout);

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.event(1).unwrap().time, 20);
        assert_eq!(stream.event(0).unwrap().time, 10);
        assert_eq!(stream.last().unwrap().unwrap().time, 30);
    }

    #[test]
    fn test_find_directions() {
        let (mut source, layout) = stream_fixture(&[5, 50, 5, 50]);
        let mut stream = EventStream::new(&mut source, &layout);

        assert_eq!(stream.find_forward(|e| e.time == 50).unwrap(), Some(1));
        assert_eq!(stream.find_backward(|e| e.time == 5).unwrap(), Some(2));
        assert_eq!(stream.find_forward(|e| e.time == 7).unwrap(), None);
    }

    #[test]
    fn test_backward_scan_halts_at_first_match() {
        let (mut source, layout) = stream_fixture(&[1, 2, 3, 4]);
        let mut stream = EventStream::new(&mut source, &layout);

        let mut visited = Vec::new();
        stream
            .find_backward(|e| {
                visited.push(e.time);
                e.time == 3
            })
            .unwrap();
        assert_eq!(visited, vec![4, 3]);
    }

    #[test]
    fn test_sweep_visits_in_order() {
        let (mut source, layout) = stream_fixture(&[3, 1, 2]);
        let mut stream = EventStream::new(&mut source, &layout);

        let mut times = Vec::new();
        stream.sweep(|e| times.push(e.time)).unwrap();
        assert_eq!(times, vec![3, 1, 2]);
    }

    #[test]
    fn test_sweep_crosses_block_boundaries() {
        let count = SWEEP_BLOCK_RECORDS * 2 + 3;
        let (mut source, layout, _) = counting_fixture(count);
        let mut stream = EventStream::new(&mut source, &layout);

        let mut times = Vec::new();
        stream.sweep(|e| times.push(e.time)).unwrap();
        assert_eq!(times, (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn test_sweep_reads_each_record_once() {
        let (mut source, layout, pulled) = counting_fixture(2000);
        let mut stream = EventStream::new(&mut source, &layout);

        stream.sweep(|_| {}).unwrap();
        assert_eq!(pulled.get(), 2000 * 64);
    }

    #[test]
    fn test_backward_scan_reads_only_visited_records() {
        let (mut source, layout, pulled) = counting_fixture(2000);
        let mut stream = EventStream::new(&mut source, &layout);

        let found = stream.find_backward(|e| e.time == 1990).unwrap();
        assert_eq!(found, Some(1990));
        assert_eq!(pulled.get(), 10 * 64);
    }

    #[test]
    fn test_empty_stream() {
        let (mut source, layout) = stream_fixture(&[]);
        let mut stream = EventStream::new(&mut source, &layout);

        assert!(stream.is_empty());
        assert!(stream.last().unwrap().is_none());
        assert_eq!(stream.find_backward(|_| true).unwrap(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        let (mut source, layout) = stream_fixture(&[1]);
        let mut stream = EventStream::new(&mut source, &layout);
        let _ = stream.event(1);
    }
}
