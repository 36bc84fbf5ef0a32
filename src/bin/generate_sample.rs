//! Writes three small variant tables around `V:5292480-5293019`, each in a
//! different layout the viewer accepts.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

const CHROM: &str = "V";
const REGION_START: u64 = 5_292_480;
const REGION_END: u64 = 5_293_019;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

struct Variant {
    chrom: &'static str,
    position: u64,
    alt_freq: f64,
    depth: u64,
}

/// `n` variants in the region, clustered around `hotspot`, plus a few
/// off-target rows the scorer should ignore.
fn simulate(rng: &mut SimpleRng, n: usize, hotspot: u64, max_freq: f64) -> Vec<Variant> {
    let mut variants: Vec<Variant> = (0..n)
        .map(|_| {
            let position = if rng.next_f64() < 0.6 {
                rng.range(hotspot.saturating_sub(40), hotspot + 40)
            } else {
                rng.range(REGION_START, REGION_END)
            };
            Variant {
                chrom: CHROM,
                position: position.clamp(REGION_START, REGION_END),
                alt_freq: (rng.next_f64() * max_freq * 1000.0).round() / 1000.0,
                depth: rng.range(8, 120),
            }
        })
        .collect();

    variants.push(Variant {
        chrom: "IV",
        position: REGION_START + 10,
        alt_freq: 0.2,
        depth: 40,
    });
    variants.push(Variant {
        chrom: CHROM,
        position: REGION_END + 500,
        alt_freq: 0.1,
        depth: 40,
    });
    variants.sort_by_key(|v| (v.chrom, v.position));
    variants
}

/// Tab-separated with the canonical header.
fn write_tsv(path: &str, variants: &[Variant]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating {path}"))?;
    w.write_record(["Chromosome", "Position", "AltAlleleFreq"])?;
    for v in variants {
        w.write_record([
            v.chrom.to_string(),
            v.position.to_string(),
            v.alt_freq.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Comma-separated with short headers, an extra column, a comment preamble,
/// and one unparsable row.
fn write_csv(path: &str, variants: &[Variant]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "# simulated calls, sample B")?;
    writeln!(out, "# reference=WBcel235")?;

    let mut w = csv::Writer::from_writer(out);
    w.write_record(["chrom", "pos", "depth", "AF"])?;
    for v in variants {
        w.write_record([
            v.chrom.to_string(),
            v.position.to_string(),
            v.depth.to_string(),
            v.alt_freq.to_string(),
        ])?;
    }
    w.write_record([CHROM, "unknown", "0", "0.1"])?;
    w.flush()?;
    Ok(())
}

/// Whitespace-aligned columns, as pasted from a terminal.
fn write_aligned(path: &str, variants: &[Variant]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{:<6}  {:<10}  {:<8}", "CHR", "BP", "ALT_FREQ")?;
    for v in variants {
        writeln!(out, "{:<6}  {:<10}  {:<8}", v.chrom, v.position, v.alt_freq)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let a = simulate(&mut rng, 60, 5_292_600, 0.3);
    let b = simulate(&mut rng, 80, 5_292_850, 0.5);
    let c = simulate(&mut rng, 40, 5_292_700, 0.35);

    write_tsv("sample_a.tsv", &a)?;
    write_csv("sample_b.csv", &b)?;
    write_aligned("sample_c.txt", &c)?;

    println!(
        "Wrote {}, {} and {} variants to sample_a.tsv, sample_b.csv, sample_c.txt \
         (try: mutation-load-viewer sample_a.tsv sample_b.csv sample_c.txt)",
        a.len(),
        b.len(),
        c.len()
    );
    Ok(())
}
