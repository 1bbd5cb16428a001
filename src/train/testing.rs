//! Stub collaborators shared by the engine unit tests.

use crate::config::RunConfig;
use crate::model::{Model, ParamState};
use crate::optim::{LrScheduler, Optimizer};
use crate::train::hook::{Event, Hook};
use crate::train::state::RunState;
use crate::train::{Batch, Loss, LossFn, Mode, Trainer};
use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) type SharedParams = Arc<Mutex<Vec<f32>>>;

/// Call counters wired through a fixture's collaborators.
#[derive(Clone, Default)]
pub(crate) struct Counters {
    pub forward: Arc<AtomicUsize>,
    pub backward: Arc<AtomicUsize>,
    pub zero_grad: Arc<AtomicUsize>,
    pub optim_steps: Arc<AtomicUsize>,
    pub sched_steps: Arc<AtomicUsize>,
}

impl Counters {
    pub fn get(counter: &Arc<AtomicUsize>) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Scales its input by the first parameter; params live behind a shared
/// handle so the stub optimizer can update them.
pub(crate) struct StubModel {
    pub params: SharedParams,
    pub mode: Mode,
    pub forward: Arc<AtomicUsize>,
    pub fail_forward: bool,
}

impl StubModel {
    pub fn new(params: SharedParams, forward: Arc<AtomicUsize>) -> Self {
        Self { params, mode: Mode::Training, forward, fail_forward: false }
    }
}

impl Model for StubModel {
    type Input = Vec<f32>;
    type Target = Vec<f32>;
    type Output = Vec<f32>;

    fn forward(&mut self, input: &Vec<f32>) -> Result<Vec<f32>> {
        if self.fail_forward {
            return Err(Error::Compute("stub forward failure".to_string()));
        }
        self.forward.fetch_add(1, Ordering::SeqCst);
        let w = self.params.lock().unwrap()[0];
        Ok(input.iter().map(|x| x * w).collect())
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn param_state(&self) -> Result<ParamState> {
        serde_json::to_value(&*self.params.lock().unwrap())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    fn load_param_state(&mut self, state: &ParamState) -> Result<()> {
        *self.params.lock().unwrap() =
            serde_json::from_value(state.clone()).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(())
    }
}

/// Nudges every shared parameter on `step`; the engine never calling it in
/// validation is what keeps parameters frozen there.
pub(crate) struct StubOptimizer {
    pub params: SharedParams,
    pub lr: f32,
    pub zero_grad: Arc<AtomicUsize>,
    pub steps: Arc<AtomicUsize>,
}

impl Optimizer for StubOptimizer {
    fn zero_grad(&mut self) {
        self.zero_grad.fetch_add(1, Ordering::SeqCst);
    }

    fn step(&mut self) -> Result<()> {
        self.steps.fetch_add(1, Ordering::SeqCst);
        for p in self.params.lock().unwrap().iter_mut() {
            *p -= self.lr * 0.1;
        }
        Ok(())
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

/// Counts advances, keeps a fixed rate.
pub(crate) struct CountingScheduler {
    pub lr: f32,
    pub on_step: bool,
    pub steps: Arc<AtomicUsize>,
}

impl LrScheduler for CountingScheduler {
    fn lr(&self) -> f32 {
        self.lr
    }

    fn step(&mut self) {
        self.steps.fetch_add(1, Ordering::SeqCst);
    }

    fn update_on_step(&self) -> bool {
        self.on_step
    }
}

pub(crate) struct StubLoss {
    value: f32,
    backward: Arc<AtomicUsize>,
}

impl Loss for StubLoss {
    fn value(&self) -> f32 {
        self.value
    }

    fn backward(&mut self) -> Result<()> {
        self.backward.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Mean squared error over the stub vectors.
pub(crate) struct SquaredError {
    pub backward: Arc<AtomicUsize>,
}

impl LossFn<Vec<f32>, Vec<f32>> for SquaredError {
    fn forward(&self, output: &Vec<f32>, target: &Vec<f32>) -> Result<Box<dyn Loss>> {
        let n = output.len().max(1) as f32;
        let sum: f32 = output
            .iter()
            .zip(target.iter())
            .map(|(o, t)| (o - t) * (o - t))
            .sum();
        Ok(Box::new(StubLoss { value: sum / n, backward: self.backward.clone() }))
    }
}

/// `n` batches of small constant vectors.
pub(crate) fn batches(n: usize) -> Vec<Batch<Vec<f32>, Vec<f32>>> {
    (0..n)
        .map(|i| Batch::new(vec![i as f32, 1.0], vec![0.5, 0.5]))
        .collect()
}

/// A fully wired trainer over stub collaborators plus its call counters.
pub(crate) fn try_fixture(
    config: RunConfig,
    train_batches: usize,
    val_batches: usize,
) -> Result<(Trainer<StubModel>, Counters, SharedParams)> {
    let counters = Counters::default();
    let params: SharedParams = Arc::new(Mutex::new(vec![1.0, 2.0]));

    let model = StubModel::new(params.clone(), counters.forward.clone());
    let optimizer = StubOptimizer {
        params: params.clone(),
        lr: config.optimizer.base_lr,
        zero_grad: counters.zero_grad.clone(),
        steps: counters.optim_steps.clone(),
    };
    let scheduler = CountingScheduler {
        lr: config.optimizer.base_lr,
        on_step: config.scheduler.update_on_step,
        steps: counters.sched_steps.clone(),
    };
    let loss_fn = SquaredError { backward: counters.backward.clone() };

    let trainer = Trainer::new(
        model,
        Box::new(batches(train_batches)),
        Box::new(batches(val_batches)),
        Box::new(optimizer),
        Box::new(scheduler),
        Box::new(loss_fn),
        config,
    )?;

    Ok((trainer, counters, params))
}

/// [`try_fixture`] for the common case of a valid config.
pub(crate) fn fixture(
    config: RunConfig,
    train_batches: usize,
    val_batches: usize,
) -> (Trainer<StubModel>, Counters, SharedParams) {
    try_fixture(config, train_batches, val_batches).unwrap()
}

/// Records every event dispatched to it, in order.
pub(crate) struct EventLog {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> (Self, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (Self { events: events.clone() }, events)
    }
}

impl<M: Model> Hook<M> for EventLog {
    fn name(&self) -> &'static str {
        "EventLog"
    }

    fn dispatch(&mut self, event: Event, _run: &mut RunState<M>) -> Result<bool> {
        self.events.lock().unwrap().push(event);
        Ok(false)
    }
}

/// Runs a closure on one event, a no-op everywhere else.
pub(crate) struct FnHook<F> {
    pub event: Event,
    pub f: F,
}

impl<M, F> Hook<M> for FnHook<F>
where
    M: Model,
    F: FnMut(&mut RunState<M>) -> Result<bool> + Send,
{
    fn name(&self) -> &'static str {
        "FnHook"
    }

    fn dispatch(&mut self, event: Event, run: &mut RunState<M>) -> Result<bool> {
        if event == self.event {
            (self.f)(run)
        } else {
            Ok(false)
        }
    }
}
