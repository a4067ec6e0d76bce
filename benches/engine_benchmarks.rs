//! Benchmarks for move generation, make/unmake, evaluation and search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use arbor_chess::board::{Board, Evaluator, MoveStatus, NoProgress, NodeId, SearchEngine, SearchParams};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w - - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = Board::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    let mut kiwipete = Board::from_fen(KIWIPETE).unwrap();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
        ("middlegame", MIDDLEGAME),
        ("kiwipete", KIWIPETE),
    ] {
        let mut board = Board::from_fen(fen).unwrap();
        group.bench_function(BenchmarkId::new("pseudo", name), |b| {
            b.iter(|| black_box(board.pseudo_moves()))
        });
        group.bench_function(BenchmarkId::new("legal", name), |b| {
            b.iter(|| black_box(board.valid_moves()))
        });
    }

    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    let mut board = Board::new();
    let deep = board
        .play_line(&["e2-e4", "e7-e5", "Ng1-f3", "Nb8-c6", "Bf1-b5", "a7-a6"])
        .unwrap();
    board.process(NodeId::ROOT).unwrap();
    let other = board.play_line(&["d2-d4", "d7-d5", "c2-c4"]).unwrap();

    group.bench_function("branch_switch", |b| {
        b.iter(|| {
            board.process(black_box(deep)).unwrap();
            board.process(black_box(other)).unwrap();
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = Board::new();
                let player = board.to_move();
                let mut engine = SearchEngine::new(SearchParams::default());
                engine.next_move(&mut board, player, depth, &NoProgress)
            })
        });
    }

    for depth in [2, 3] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board =
                    Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w").unwrap();
                let player = board.to_move();
                let mut engine = SearchEngine::new(SearchParams::default());
                engine.next_move(&mut board, player, depth, &NoProgress)
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");
    let evaluator = Evaluator::new();

    let positions = [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
        ("middlegame", MIDDLEGAME),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 40"),
    ];

    for (name, fen) in positions {
        let board = Board::from_fen(fen).unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(evaluator.evaluate(board, MoveStatus::Normal, 0)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_process,
    bench_search,
    bench_eval
);
criterion_main!(benches);
