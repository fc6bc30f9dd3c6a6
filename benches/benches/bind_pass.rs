// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use regionmap_binder::{
    Binder, LabelIdx, MapConfig, MapScene, MemoryStore, NoHost, SelectionController, Silent,
};
use regionmap_catalog::{Catalog, LabelMatcher};
use regionmap_scene::{LocalElement, Scene};

/// An `n * n` grid of square shapes. Every other cell carries a label naming a
/// catalog region at its center; the rest must bind by proximity or stay unbound.
fn gen_grid_scene(catalog: &Catalog, n: usize, cell: f64) -> Scene {
    let names: Vec<&str> = catalog
        .regions()
        .iter()
        .map(|r| r.display_name.as_str())
        .collect();
    let mut scene = Scene::new();
    let mut labels = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            scene.insert(
                None,
                LocalElement::rect_shape(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
            let i = y * n + x;
            if i % 2 == 0 {
                let c = Point::new(x0 + cell * 0.5, y0 + cell * 0.5);
                labels.push((names[(i / 2) % names.len()], c));
            }
        }
    }
    for (text, c) in labels {
        scene.insert(
            None,
            LocalElement::label(text, Rect::new(c.x - 10.0, c.y - 4.0, c.x + 10.0, c.y + 4.0)),
        );
    }
    scene.commit();
    scene
}

fn bench_load_and_bind(c: &mut Criterion) {
    let catalog = Catalog::colombia();
    let config = MapConfig::default();
    let mut group = c.benchmark_group("bind_pass");
    for &n in &[8_usize, 16, 32] {
        let scene = gen_grid_scene(&catalog, n, 60.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("load/n={n}"), |b| {
            b.iter_batched(
                || scene.clone(),
                |scene| black_box(MapScene::load(scene, &LabelMatcher::new(&catalog))),
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("bind_all/n={n}"), |b| {
            b.iter_batched(
                || MapScene::load(scene.clone(), &LabelMatcher::new(&catalog)),
                |mut map| black_box(Binder::new(&config).bind_all(&mut map)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_label_click(c: &mut Criterion) {
    let catalog = Catalog::colombia();
    let config = MapConfig::default();
    let mut group = c.benchmark_group("label_click");
    for &n in &[8_usize, 32] {
        let mut map = MapScene::load(gen_grid_scene(&catalog, n, 60.0), &LabelMatcher::new(&catalog));
        Binder::new(&config).bind_all(&mut map);
        let labels = map.labels().len();
        let mut controller =
            SelectionController::new(&catalog, &config, MemoryStore::new(), NoHost, Silent);
        let mut next = 0;
        group.bench_function(format!("select/n={n}"), |b| {
            b.iter(|| {
                next = (next + 7) % labels;
                black_box(controller.select_by_label_click(&mut map, LabelIdx(next)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load_and_bind, bench_label_click);
criterion_main!(benches);
