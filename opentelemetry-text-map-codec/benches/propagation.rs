use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use opentelemetry::{
    baggage::BaggageExt,
    trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState},
    Context, KeyValue,
};
use opentelemetry_text_map_codec::{
    JaegerExtractor, JaegerInjector, TraceContextExtractor, TraceContextInjector,
};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

// Run this benchmark with:
// cargo bench --bench propagation

fn criterion_benchmark(c: &mut Criterion) {
    extract_group(c, BenchmarkParameter::IdentityOnly);
    extract_group(c, BenchmarkParameter::WithBaggage);
    inject_group(c, BenchmarkParameter::IdentityOnly);
    inject_group(c, BenchmarkParameter::WithBaggage);
}

fn extract_group(c: &mut Criterion, p: BenchmarkParameter) {
    let mut jaeger_headers = HashMap::new();
    jaeger_headers.insert(
        "uber-trace-id".to_string(),
        "4bf92f3577b34da6a3ce929d0e0e4736:00f067aa0ba902b7:0:1".to_string(),
    );
    let mut trace_context_headers = HashMap::new();
    trace_context_headers.insert(
        "traceparent".to_string(),
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01".to_string(),
    );
    if let BenchmarkParameter::WithBaggage = p {
        for i in 0..8 {
            jaeger_headers.insert(format!("uberctx-key{i}"), format!("value%20{i}"));
        }
        trace_context_headers.insert(
            "tracestate".to_string(),
            "congo=t61rcWkgMzE,rojo=00f067aa0ba902b7".to_string(),
        );
    }

    let jaeger = JaegerExtractor::new();
    let trace_context = TraceContextExtractor::new();
    let parent = Context::new();

    let mut group = c.benchmark_group("extract");
    group.bench_function(BenchmarkId::new("jaeger", p), |b| {
        b.iter(|| black_box(jaeger.extract(black_box(&jaeger_headers), &parent)))
    });
    group.bench_function(BenchmarkId::new("trace_context", p), |b| {
        b.iter(|| {
            black_box(trace_context.extract(black_box(&trace_context_headers), &parent))
        })
    });
    group.finish();
}

fn inject_group(c: &mut Criterion, p: BenchmarkParameter) {
    let trace_state = match p {
        BenchmarkParameter::IdentityOnly => TraceState::default(),
        BenchmarkParameter::WithBaggage => {
            TraceState::from_str("congo=t61rcWkgMzE,rojo=00f067aa0ba902b7")
                .unwrap_or_default()
        }
    };
    let mut cx = Context::new().with_remote_span_context(SpanContext::new(
        TraceId::from(0x4bf9_2f35_77b3_4da6_a3ce_929d_0e0e_4736_u128),
        SpanId::from(0x00f0_67aa_0ba9_02b7_u64),
        TraceFlags::SAMPLED,
        true,
        trace_state,
    ));
    if let BenchmarkParameter::WithBaggage = p {
        cx = cx.with_baggage(
            (0..8).map(|i| KeyValue::new(format!("key{i}"), format!("value {i}"))),
        );
    }

    let jaeger = JaegerInjector::new();
    let trace_context = TraceContextInjector::new();

    let mut group = c.benchmark_group("inject");
    group.bench_function(BenchmarkId::new("jaeger", p), |b| {
        b.iter(|| {
            let mut carrier: HashMap<String, String> = HashMap::new();
            jaeger.inject(black_box(&cx), &mut carrier);
            black_box(carrier)
        })
    });
    group.bench_function(BenchmarkId::new("trace_context", p), |b| {
        b.iter(|| {
            let mut carrier: HashMap<String, String> = HashMap::new();
            trace_context.inject(black_box(&cx), &mut carrier);
            black_box(carrier)
        })
    });
    group.finish();
}

#[derive(Copy, Clone)]
enum BenchmarkParameter {
    IdentityOnly,
    WithBaggage,
}

impl Display for BenchmarkParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            BenchmarkParameter::IdentityOnly => write!(f, "identity-only"),
            BenchmarkParameter::WithBaggage => write!(f, "with-baggage"),
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
