// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_css` resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::vec::Vec;

use understory_css::{
    AncestorStack, PseudoClass, ResolveCx, RuleBuilder, SelectorChain, SelectorNames, StyleSheet,
    StyleSheetBuilder, StyleTarget, TypeRegistry, TypeTag,
};
use understory_css_property::{Param, Property, PropertyRegistry};

#[derive(Clone, Copy)]
struct Elem {
    key: u32,
    kind: TypeTag,
}

impl StyleTarget<u32> for Elem {
    fn key(&self) -> u32 {
        self.key
    }

    fn type_tag(&self) -> TypeTag {
        self.kind
    }
}

/// A sheet of `rules` rules cycling through class, compound, nested and type
/// selectors, every one of them declaring one of `properties`.
fn build_sheet(rules: usize, properties: &[Property]) -> StyleSheet {
    let mut builder = StyleSheetBuilder::new();
    for i in 0..rules {
        let chain = match i % 4 {
            0 => format!(".c{}", i % 16),
            1 => format!(".c{}.active", i % 16),
            2 => format!(".scope{} .c{}", i % 3, i % 16),
            _ => "ui.Component".into(),
        };
        let pseudo_class = if i % 5 == 0 {
            PseudoClass::Hover
        } else {
            PseudoClass::None
        };
        let property = properties[i % properties.len()];
        builder = builder.rule(
            RuleBuilder::new(SelectorChain::parse(&chain).unwrap())
                .pseudo_class(pseudo_class)
                .declare(property, [Param::new(i as u32)])
                .build(),
        );
    }
    builder.build()
}

fn bench_resolve(c: &mut Criterion) {
    let mut registry = PropertyRegistry::new();
    let properties: Vec<Property> = (0..8)
        .map(|i| registry.register(format!("p{i}")))
        .collect();

    let mut types = TypeRegistry::new();
    let component = types.register("ui.Component");
    let button = types.register_subtype("ui.Button", component);

    let mut names = SelectorNames::<u32>::new();
    names.register(1, ".c3.active").unwrap();
    let elem = Elem {
        key: 1,
        kind: button,
    };
    let stack = AncestorStack::parse(".root .scope0 .scope1 .scope2").unwrap();

    let mut group = c.benchmark_group("css/resolve");
    for rules in [16_usize, 128, 1024] {
        let sheet = build_sheet(rules, &properties);
        let cx = ResolveCx::new(&sheet, &names, &types);

        group.bench_function(BenchmarkId::new("none", rules), |b| {
            b.iter(|| black_box(cx.resolve(&elem, &stack, PseudoClass::None)))
        });
        group.bench_function(BenchmarkId::new("hover", rules), |b| {
            b.iter(|| black_box(cx.resolve(&elem, &stack, PseudoClass::Hover)))
        });
    }
    group.finish();

    let sheet = build_sheet(128, &properties);
    let cx = ResolveCx::new(&sheet, &names, &types);
    let Ok(set) = cx.resolve(&elem, &stack, PseudoClass::None) else {
        panic!("benchmark sheet only names registered types");
    };

    let mut group = c.benchmark_group("css/declarations");
    group.bench_function("is_after", |b| {
        b.iter(|| black_box(set.is_after(properties[0], properties[1])))
    });
    group.bench_function("filtered", |b| {
        b.iter(|| black_box(set.filtered(&properties[..3])))
    });
    group.bench_function("effective", |b| {
        b.iter(|| black_box(set.effective().count()))
    });
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
