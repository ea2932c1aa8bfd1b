use closable_queue::core::report::{append_reports, DeliveryReport};
use closable_queue::{Queue, SharedQueue};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PRODUCERS: usize = 4;
const CONSUMERS: usize = 3;
const ITEMS_PER_PRODUCER: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let queue: SharedQueue<String> = Arc::new(Queue::new());

    // Consumers block until the producers are done and the queue is drained
    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|c| {
            let queue = queue.clone();
            thread::spawn(move || {
                let mut delivered = Vec::new();
                while let Some(item) = queue.pop_blocking() {
                    delivered.push(item);
                }
                DeliveryReport::new(format!("C{}", c), delivered, queue.snapshot())
            })
        })
        .collect();

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || -> Result<(), closable_queue::ClosedError<String>> {
                for i in 1..=ITEMS_PER_PRODUCER {
                    let item = format!("P{}-Item {}", p, i);
                    // Never queue the same item twice
                    queue.push_unique(item.clone(), |queued| *queued == item)?;
                    thread::sleep(Duration::from_millis(10));
                }
                Ok(())
            })
        })
        .collect();

    for handle in producers {
        handle.join().expect("producer thread panicked")?;
    }
    queue.close();

    let reports: Vec<_> = consumers
        .into_iter()
        .map(|handle| handle.join().expect("consumer thread panicked"))
        .collect();

    let total: usize = reports.iter().map(|r| r.delivered.len()).sum();
    info!(total, consumers = reports.len(), "queue drained");

    append_reports(&reports, "output.ndjson")?;
    Ok(())
}
