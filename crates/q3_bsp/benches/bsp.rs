use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod read {
    use divan::Bencher;
    use q3_bsp::{BspFile, BspWriter};

    fn get_input() -> Vec<u8> {
        let mut writer = BspWriter::new();
        for i in 0..512 {
            let model = format!("models/mapobjects/bench_{:03}.md3", i);
            writer = writer
                .texture(&format!("textures/bench/surface_{:03}", i))
                .entity(&[("classname", "misc_model"), ("model", model.as_str())]);
        }
        writer.finish().unwrap()
    }

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(BspFile::new(data).unwrap());
        });
    }

    #[divan::bench]
    fn textures(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            let bsp = BspFile::new(data).unwrap();
            divan::black_box(bsp.textures().unwrap());
        });
    }

    #[divan::bench]
    fn dependencies(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            let bsp = BspFile::new(data).unwrap();
            divan::black_box(bsp.dependencies().unwrap());
        });
    }
}
