use crate::bus::{Bus, Phase};
use crate::command::MAX_COMMAND_BYTES;
use core::cell::RefCell;
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

/// Something the driver did on the link.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    Phase(Phase),
    Send { bytes: [u8; MAX_COMMAND_BYTES], bits: usize },
    Receive { bits: usize },
    /// Only recorded through [`Shared`].
    Delay { ms: u32 },
}

/// Records every phase change and transfer.
///
/// Transfers in [`Phase::Rising`] are recorded as sent commands; transfers in [`Phase::Falling`]
/// are answered from the queue of responses.
pub struct FakeBus<const N: usize> {
    pub events: Vec<Event, N>,
    responses: Deque<u16, 16>,
    phase: Phase,
    fail_after: Option<usize>,
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            events: Vec::new(),
            responses: Deque::new(),
            phase: Phase::Rising,
            fail_after: None,
        }
    }

    /// Queues the four calibration words, in read order.
    pub fn with_calibration(mut self, words: [u16; 4]) -> Self {
        for w in words {
            self.responses.push_back(w).unwrap();
        }

        self
    }

    pub fn with_response(mut self, word: u16) -> Self {
        self.responses.push_back(word).unwrap();

        self
    }

    /// Every transfer after the first `transfers` ones fails.
    pub fn failing_after(mut self, transfers: usize) -> Self {
        self.fail_after = Some(transfers);

        self
    }

    pub fn phase_changes(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::Phase(_))).count()
    }

    pub fn sent(&self) -> impl Iterator<Item = ([u8; MAX_COMMAND_BYTES], usize)> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Send { bytes, bits } => Some((*bytes, *bits)),
            _ => None,
        })
    }

    fn transfers(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Send { .. } | Event::Receive { .. }))
            .count()
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_after {
            if self.transfers() >= limit {
                return Err(());
            }
        }

        match self.phase {
            Phase::Rising => {
                let mut bytes = [0u8; MAX_COMMAND_BYTES];
                let len = (bits + 7) / 8;
                bytes[..len].copy_from_slice(&tx[..len]);
                self.events.push(Event::Send { bytes, bits }).unwrap();
            }
            Phase::Falling => {
                let word = self.responses.pop_front().expect("no queued response");
                rx[..2].copy_from_slice(&word.to_be_bytes());
                self.events.push(Event::Receive { bits }).unwrap();
            }
        }

        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        self.phase = phase;
        self.events.push(Event::Phase(phase)).unwrap();

        Ok(())
    }
}

/// Records requested delays without sleeping.
pub struct FakeDelay {
    pub delays_ms: Vec<u32, 16>,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self { delays_ms: Vec::new() }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms).unwrap();
    }
}

/// Hands one [`FakeBus`] to the driver as both its bus and its delay, so that delays land in the
/// same event log as the transfers around them.
#[derive(Copy, Clone)]
pub struct Shared<'a, const N: usize>(pub &'a RefCell<FakeBus<N>>);

impl<const N: usize> Bus for Shared<'_, N> {
    type Error = ();

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8], bits: usize) -> Result<(), Self::Error> {
        self.0.borrow_mut().transfer(tx, rx, bits)
    }

    fn set_phase(&mut self, phase: Phase) -> Result<(), Self::Error> {
        self.0.borrow_mut().set_phase(phase)
    }
}

impl<const N: usize> DelayNs for Shared<'_, N> {
    fn delay_ns(&mut self, _: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().events.push(Event::Delay { ms }).unwrap();
    }
}
