use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use graphql_merge::{
    resolve, resolve_repository, CandidatePool, PoolPolicy, RepositoryFragment, SchemaFragment,
};
use std::hint::black_box;

const ENTRY: &str = r"
type Query {
  user(id: ID!): User
  users: [User!]!
  post(id: ID!): Post @cached(ttl: 60)
}
";

const USER: &str = r"
type User {
  id: ID!
  name: String!
  posts: [Post!]!
  avatar: Image
}
";

const POST: &str = r"
type Post {
  id: ID!
  title: String!
  author: User!
  tags: [Tag!]!
}
";

const LEAVES: &str = r"
type Image { url: String! }
type Tag { label: String! }
";

const DIRECTIVES: &str = r"
directive @cached(ttl: Int) on FIELD_DEFINITION
";

fn url(path: &str) -> String {
    format!("https://github.com/acme/api/blob/main/{path}")
}

fn fragment(path: &str, text: &str) -> SchemaFragment {
    SchemaFragment::new(path, url(path), text)
}

/// Sibling fragments plus unrelated noise so ranking has work to do
fn repository_fragments(noise: usize) -> Vec<SchemaFragment> {
    let mut fragments = vec![
        fragment("schema/user.graphql", USER),
        fragment("schema/post.graphql", POST),
        fragment("schema/leaves.graphql", LEAVES),
        fragment("schema/directives.graphql", DIRECTIVES),
    ];
    for i in 0..noise {
        let path = format!("vendor/pkg{i}/schema.graphql");
        let text = format!("type User {{ legacy{i}: Int }}\ntype Noise{i} {{ id: ID }}");
        fragments.push(SchemaFragment::new(path.clone(), url(&path), text));
    }
    fragments
}

/// Parsing cost of a single fragment
fn bench_parse_fragment(c: &mut Criterion) {
    c.bench_function("parse_fragment", |b| {
        b.iter(|| black_box(graphql_syntax::parse(black_box(POST))));
    });
}

fn bench_pool_construction(c: &mut Criterion) {
    c.bench_function("pool_construction_50", |b| {
        b.iter_batched(
            || repository_fragments(50),
            |fragments| black_box(CandidatePool::from_fragments(fragments)),
            BatchSize::SmallInput,
        );
    });
}

/// Full type and directive closure for one entry
fn bench_resolve_small(c: &mut Criterion) {
    let entry = fragment("schema/query.graphql", ENTRY);
    let (pool, _) = CandidatePool::from_fragments(repository_fragments(0));

    c.bench_function("resolve_small", |b| {
        b.iter_batched(
            || pool.clone(),
            |mut pool| black_box(resolve(&entry, &mut pool)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_resolve_with_noise(c: &mut Criterion) {
    let entry = fragment("schema/query.graphql", ENTRY);
    let (pool, _) = CandidatePool::from_fragments(repository_fragments(200));

    c.bench_function("resolve_with_200_noise_fragments", |b| {
        b.iter_batched(
            || pool.clone(),
            |mut pool| black_box(resolve(&entry, &mut pool)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_repository(c: &mut Criterion) {
    let mut fragments: Vec<_> = (0..10)
        .map(|i| {
            RepositoryFragment::entry(fragment(&format!("services/svc{i}/query.graphql"), ENTRY))
        })
        .collect();
    fragments.extend(
        repository_fragments(20)
            .into_iter()
            .map(RepositoryFragment::auxiliary),
    );

    let mut group = c.benchmark_group("resolve_repository_10_entries");
    group.bench_function("shared", |b| {
        b.iter(|| black_box(resolve_repository(&fragments, PoolPolicy::Shared)));
    });
    group.bench_function("per_entry", |b| {
        b.iter(|| black_box(resolve_repository(&fragments, PoolPolicy::PerEntry)));
    });
    group.finish();
}

/// Canonical fingerprint of a merged schema, as used by dedupe
fn bench_fingerprint(c: &mut Criterion) {
    let text = [ENTRY, USER, POST, LEAVES, DIRECTIVES].concat();
    c.bench_function("schema_fingerprint", |b| {
        b.iter(|| black_box(graphql_collector::schema_fingerprint(black_box(&text))));
    });
}

criterion_group!(
    benches,
    bench_parse_fragment,
    bench_pool_construction,
    bench_resolve_small,
    bench_resolve_with_noise,
    bench_repository,
    bench_fingerprint,
);
criterion_main!(benches);
