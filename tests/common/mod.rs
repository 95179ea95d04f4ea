use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gridable::ReaderWriterGate;
use parking_lot::Mutex;

/// How long each critical section holds the gate, to force overlap between
/// concurrently submitted tasks.
pub const HOLD_IN_MS: u64 = 50;

pub const WORKERS: usize = 3;

/// Counts holders inside the gate and checks the exclusivity invariant from
/// within every critical section.
#[derive(Default)]
pub struct HolderProbe {
    pub gate: ReaderWriterGate<()>,
    pub readers: AtomicUsize,
    pub writers: AtomicUsize,
    pub max_readers: AtomicUsize,
}

impl HolderProbe {
    pub fn read(&self) {
        self.gate.run_shared(|_| {
            let readers = self.readers.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_readers.fetch_max(readers, Ordering::SeqCst);
            assert_eq!(self.writers.load(Ordering::SeqCst), 0);
            thread::sleep(Duration::from_millis(HOLD_IN_MS));
            assert_eq!(self.writers.load(Ordering::SeqCst), 0);
            self.readers.fetch_sub(1, Ordering::SeqCst);
        })
    }

    pub fn write(&self) {
        self.gate.run_exclusive(|_| {
            assert_eq!(self.writers.fetch_add(1, Ordering::SeqCst), 0);
            assert_eq!(self.readers.load(Ordering::SeqCst), 0);
            thread::sleep(Duration::from_millis(HOLD_IN_MS));
            assert_eq!(self.readers.load(Ordering::SeqCst), 0);
            self.writers.fetch_sub(1, Ordering::SeqCst);
        })
    }

    pub fn assert_idle(&self) {
        assert_eq!(self.readers.load(Ordering::SeqCst), 0);
        assert_eq!(self.writers.load(Ordering::SeqCst), 0);
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Task {
    Read,
    Write,
}

/// Feeds `tasks` in order to a fixed pool of worker threads and waits for
/// all of them. Panics if any critical section observed a violation.
pub fn run_with_workers(
    probe: &Arc<HolderProbe>,
    tasks: &[Task],
) {
    let (tx, rx) = mpsc::channel::<Task>();
    let rx = Arc::new(Mutex::new(rx));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let rx = Arc::clone(&rx);
            let probe = Arc::clone(probe);
            thread::spawn(move || loop {
                let task = rx.lock().recv();
                match task {
                    Ok(Task::Read) => probe.read(),
                    Ok(Task::Write) => probe.write(),
                    Err(_) => break,
                }
            })
        })
        .collect();

    for task in tasks {
        tx.send(*task).unwrap();
    }
    drop(tx);

    for handle in handles {
        handle.join().expect("worker observed an exclusivity violation");
    }
    probe.assert_idle();
}
