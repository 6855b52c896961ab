use criterion::{criterion_group, criterion_main, Criterion};
use despool::Document;

fn synthetic_dump(statements: usize, extra_pages: usize) -> String {
    let mut dump = String::new();
    let mut stamp = 0;
    let mut line = |dump: &mut String, content: &str| {
        stamp += 1;
        dump.push_str(&format!("{:<60}{:>9}\n", content, stamp));
    };
    for n in 0..statements {
        dump.push_str("000000001\n");
        line(&mut dump, "GOLD RESERVE BANK");
        line(&mut dump, "Period 3, 2011 to Period 4, 2011");
        line(&mut dump, &format!("CUSTOMER NUMBER {}", n));
        line(&mut dump, "100 MAIN ST");
        line(&mut dump, "ANYTOWN, ST 00000");
        line(&mut dump, "***** Summary of Account Activity *****");
        line(&mut dump, "Beginning balance 1,234.56");
        line(&mut dump, "Ending balance 2,345.67");
        for _ in 0..extra_pages {
            dump.push_str("000000001\n");
            line(&mut dump, "Account detail continued");
            line(&mut dump, "Deposit 500.00");
            line(&mut dump, "Withdrawal 125.00");
        }
    }
    dump
}

fn criterion_benchmark(c: &mut Criterion) {
    let input = synthetic_dump(200, 3);
    c.bench_function("Segment dump", |b| b.iter(|| Document::from_text(&input)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
