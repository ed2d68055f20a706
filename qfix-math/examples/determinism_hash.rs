use qfix_math::{Fixed, Q15_16};

// Prints a digest of kernel outputs over a fixed grid. Identical digests
// across targets show the arithmetic is bit-reproducible.
fn main() {
    type F = Fixed<Q15_16>;

    let mut bytes = Vec::new();
    for i in -512i32..512 {
        let x = F::from_float(i as f64 / 16.0);
        let outputs = [
            x.raw(),
            x.sin().raw(),
            x.cos().raw(),
            x.tan().raw(),
            x.absolute().sqrt().map(|r| r.raw()).unwrap_or(0),
            x.multiply(x).raw(),
            F::one().divide(x).map(|r| r.raw()).unwrap_or(0),
        ];
        for v in outputs {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    let digest = sha256(&bytes);
    println!("Q15_16_KERNEL_HASH {}", digest);
}

fn sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let out = hasher.finalize();
    hex::encode(out)
}
