use codable::{from_str, to_string, Codable, DecodeNode, EncodeNode, Result};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default, Debug, PartialEq)]
struct Contact {
    name: String,
    country: i32,
    number: i64,
}

impl Codable for Contact {
    fn populate(&self, node: &mut EncodeNode<'_>) -> Result<()> {
        node.field("name", &self.name)?;
        node.field("country", &self.country)?;
        node.field("number", &self.number)
    }

    fn absorb(&mut self, node: DecodeNode<'_>) -> Result<()> {
        self.name = node.field("name")?;
        self.country = node.field("country")?;
        self.number = node.field("number")?;
        Ok(())
    }
}

fn sample_book(len: usize) -> Vec<Contact> {
    (0..len)
        .map(|i| Contact {
            name: format!("contact-{}", i),
            country: (i % 200) as i32,
            number: 1_000_000 + i as i64,
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let book = sample_book(100);
    c.bench_function("encode_100_contacts", |b| {
        b.iter(|| to_string(black_box(&book)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let text = to_string(&sample_book(100)).unwrap();
    c.bench_function("decode_100_contacts", |b| {
        b.iter(|| from_str::<Vec<Contact>>(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
