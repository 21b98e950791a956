//! Allocation accounting across every terminal status.
//!
//! A counting global allocator records, per thread, how many blocks were
//! allocated and released while a run executes. Every run must release
//! exactly the blocks it allocated, whatever status it ends with.

#![allow(unsafe_code)]

mod common;

use common::{rosenbrock_start, NegativeCurvature, NeverDecreasing, Rosenbrock, ShiftedQuadratic};
use lbfgslite_core::{
    callback::CallbackInfo,
    cost_function::{CostFunction, QuadraticCost},
    error::{LbfgsError, Result, Status},
    optimizer::OptimizationResult,
    parameters::LbfgsParameters,
    types::DVector,
};
use lbfgslite_optim::Lbfgs;
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static DEALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = DEALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AllocationCounts {
    allocations: usize,
    deallocations: usize,
}

fn snapshot() -> AllocationCounts {
    AllocationCounts {
        allocations: ALLOCATIONS.with(Cell::get),
        deallocations: DEALLOCATIONS.with(Cell::get),
    }
}

/// Runs `f` and returns its output with the allocations made meanwhile.
fn counted<R>(f: impl FnOnce() -> R) -> (R, AllocationCounts) {
    let before = snapshot();
    let output = f();
    let after = snapshot();
    let counts = AllocationCounts {
        allocations: after.allocations - before.allocations,
        deallocations: after.deallocations - before.deallocations,
    };
    (output, counts)
}

fn run<C: CostFunction<f64>>(
    params: LbfgsParameters<f64>,
    x: &mut DVector<f64>,
    cost: &mut C,
    cancel_at: Option<usize>,
) -> (Result<OptimizationResult<f64>>, AllocationCounts) {
    let lbfgs = Lbfgs::new(params);
    let mut callback = |info: &CallbackInfo<'_, f64>| cancel_at.map_or(true, |k| info.iteration < k);
    counted(|| lbfgs.minimize_with_callback(x, cost, &mut callback))
}

fn assert_balanced(counts: AllocationCounts) {
    assert!(counts.allocations > 0, "the run should own working buffers");
    assert_eq!(counts.allocations, counts.deallocations);
}

#[test]
fn test_counter_observes_allocations() {
    let (_, counts) = counted(|| {
        let v = vec![1u8; 16];
        drop(v);
    });
    assert_eq!(counts, AllocationCounts { allocations: 1, deallocations: 1 });
}

#[test]
fn test_configuration_error_allocates_nothing() {
    let mut x = DVector::from_element(3, 1.0);
    let mut cost = QuadraticCost::sum_of_squares(3);

    let (result, counts) = run(LbfgsParameters::default().with_mem_size(0), &mut x, &mut cost, None);

    assert_eq!(result.unwrap_err(), LbfgsError::InvalidMemSize);
    assert_eq!(counts, AllocationCounts { allocations: 0, deallocations: 0 });
}

#[test]
fn test_every_terminal_status_releases_its_buffers() {
    let default = LbfgsParameters::<f64>::default;

    let mut outcomes = Vec::new();

    let mut x = DVector::from_element(4, 2.0);
    outcomes.push(run(default(), &mut x, &mut QuadraticCost::sum_of_squares(4), None));

    let mut x = DVector::zeros(4);
    outcomes.push(run(default(), &mut x, &mut QuadraticCost::sum_of_squares(4), None));

    let mut x = DVector::zeros(2);
    let mut shifted = ShiftedQuadratic::new(5.0, vec![1.0, -1.0], vec![1.0, 10.0]);
    outcomes.push(run(default().with_delta_test(2, 10.0), &mut x, &mut shifted, None));

    let mut x = rosenbrock_start(4);
    outcomes.push(run(default().with_max_iterations(3), &mut x, &mut Rosenbrock, None));

    let mut x = rosenbrock_start(4);
    outcomes.push(run(default(), &mut x, &mut Rosenbrock, Some(2)));

    let mut x = DVector::from_vec(vec![0.5, -0.5]);
    outcomes.push(run(default().with_max_linesearch(4), &mut x, &mut NeverDecreasing, None));

    let mut x = DVector::from_vec(vec![0.5, -0.5]);
    outcomes.push(run(default().with_step_bounds(0.5, 1e20), &mut x, &mut NeverDecreasing, None));

    let mut x = DVector::zeros(1);
    outcomes.push(run(default(), &mut x, &mut NegativeCurvature, None));

    let mut statuses = Vec::new();
    for (result, counts) in outcomes {
        assert_balanced(counts);
        statuses.push(result.unwrap().status);
    }

    assert_eq!(
        statuses,
        vec![
            Status::Convergence,
            Status::AlreadyMinimized,
            Status::Stop,
            Status::Failed(LbfgsError::MaximumIteration),
            Status::Failed(LbfgsError::Canceled),
            Status::Failed(LbfgsError::MaximumLineSearch),
            Status::Failed(LbfgsError::MinimumStep),
            Status::Failed(LbfgsError::IncreaseGradient),
        ]
    );
}

#[test]
fn test_repeated_runs_do_not_accumulate() {
    let lbfgs = Lbfgs::new(LbfgsParameters::default().with_delta_test(3, 1e-12));
    let mut cost = Rosenbrock;

    let mut previous = None;
    for _ in 0..3 {
        let mut x = rosenbrock_start(10);
        let (result, counts) = counted(|| lbfgs.minimize(&mut x, &mut cost));
        assert!(result.unwrap().converged());
        assert_balanced(counts);
        if let Some(previous) = previous {
            assert_eq!(counts, previous);
        }
        previous = Some(counts);
    }
}
