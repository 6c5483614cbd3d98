//! Property-based tests for the connection registry
//!
//! Random register / unregister / subscribe sequences are replayed against
//! the registry and a plain map; `connections_for` must agree with the map.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use safetrack::backend::realtime::{ConnectionHandle, ConnectionId, ConnectionRegistry, ViewerReceiver};
use safetrack::shared::ProducerId;

const SLOTS: usize = 4;
const PRODUCERS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    Unregister(usize),
    Subscribe(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SLOTS).prop_map(Op::Register),
        (0..SLOTS).prop_map(Op::Unregister),
        (0..SLOTS, 0..PRODUCERS).prop_map(|(slot, producer)| Op::Subscribe(slot, producer)),
    ]
}

fn producer(index: usize) -> ProducerId {
    ProducerId::new(format!("parent:{}", index))
}

fn run(ops: Vec<Op>) -> Result<(), TestCaseError> {
    tokio_test::block_on(async move {
        let registry = ConnectionRegistry::new();
        let (handles, _receivers): (Vec<ConnectionHandle>, Vec<ViewerReceiver>) =
            (0..SLOTS).map(|_| ConnectionHandle::channel(4)).unzip();

        // slot -> subscription of registered slots
        let mut model: HashMap<usize, Option<usize>> = HashMap::new();

        for op in ops {
            match op {
                Op::Register(slot) => {
                    registry.register(handles[slot].clone()).await;
                    model.insert(slot, None);
                }
                Op::Unregister(slot) => {
                    let removed = registry.unregister(handles[slot].id()).await;
                    prop_assert_eq!(removed, model.remove(&slot).is_some());
                }
                Op::Subscribe(slot, index) => {
                    let result = registry.set_subscription(handles[slot].id(), producer(index)).await;
                    match model.get_mut(&slot) {
                        Some(subscription) => {
                            prop_assert!(result.is_ok());
                            *subscription = Some(index);
                        }
                        None => prop_assert!(result.is_err()),
                    }
                }
            }
        }

        prop_assert_eq!(registry.len().await, model.len());

        for index in 0..PRODUCERS {
            let actual: HashSet<ConnectionId> = registry
                .connections_for(&producer(index))
                .await
                .iter()
                .map(|handle| handle.id())
                .collect();
            let expected: HashSet<ConnectionId> = model
                .iter()
                .filter(|(_, subscription)| **subscription == Some(index))
                .map(|(slot, _)| handles[*slot].id())
                .collect();
            prop_assert_eq!(actual, expected);
        }

        Ok(())
    })
}

proptest! {
    #[test]
    fn test_connections_for_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        run(ops)?;
    }
}
