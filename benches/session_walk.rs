use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spellnav::checker::dictionary::Dictionary;
use spellnav::{DictionaryChecker, MemoryDocument, Session, WordList};

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog and then ";
const TYPOS: &[&str] = &["teh", "qiuck", "borwn", "jmups"];

fn document(sentences: usize) -> String {
    let mut text = String::with_capacity(sentences * SENTENCE.len());
    for i in 0..sentences {
        text.push_str(SENTENCE);
        if i % 10 == 0 {
            text.push_str(TYPOS[i / 10 % TYPOS.len()]);
            text.push(' ');
        }
        if i % 8 == 7 {
            text.push_str("\n\n");
        }
    }
    text
}

fn walk(text: &str, checker: &DictionaryChecker) -> usize {
    let doc = MemoryDocument::new(text);
    let words = WordList::new();
    let mut session = Session::default();
    let mut found = 0;
    while let Ok(Some(_)) = session.find_next(&doc, checker, &words) {
        found += 1;
    }
    found
}

fn bench_session_walk(c: &mut Criterion) {
    let dictionary = Dictionary::from_words([
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "and", "then",
    ])
    .unwrap();
    let checker = DictionaryChecker::with_dictionary(dictionary, "en_US");

    let mut group = c.benchmark_group("session_walk");
    for sentences in [100, 1_000] {
        let text = document(sentences);
        group.bench_with_input(BenchmarkId::from_parameter(sentences), &text, |b, text| {
            b.iter(|| walk(black_box(text), &checker))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_session_walk);
criterion_main!(benches);
