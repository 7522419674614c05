use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ring_deque::{Deque, EagerDeque};
use std::collections::VecDeque;

fn bench_deque(c: &mut Criterion) {
    let n: i32 = 1024;
    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Push 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::with_capacity(8);
                for i in 0..n {
                    d.push_back(black_box(i));
                }
                d
            })
        });

        group.bench_function("Deque<i32>", |b| {
            b.iter(|| {
                let mut d = Deque::new();
                for i in 0..n {
                    d.push(black_box(i));
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs Deque (Push/Shift 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i));
                    if i % 2 == 0 {
                        black_box(d.pop_front());
                    }
                }
                d
            })
        });

        group.bench_function("Deque<i32>", |b| {
            b.iter(|| {
                let mut d = Deque::new();
                for i in 0..n {
                    d.push(black_box(i));
                    if i % 2 == 0 {
                        black_box(d.shift());
                    }
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("Drain 1024 (Pop)");
        group.bench_function("Deque<i32> + try_shrink", |b| {
            b.iter(|| {
                let mut d: Deque<i32> = (0..n).collect();
                while let Some(x) = d.pop() {
                    black_box(x);
                }
                d.shrink_to_fit();
                d
            })
        });

        group.bench_function("EagerDeque<i32>", |b| {
            b.iter(|| {
                let mut d = EagerDeque::eager();
                d.extend(0..n);
                while let Some(x) = d.pop() {
                    black_box(x);
                }
                d.capacity()
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_deque);
criterion_main!(benches);
