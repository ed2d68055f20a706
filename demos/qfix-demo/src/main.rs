use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use qfix_math::{Fixed, QFormat, Q15_16, Q21_10, Q31_32, Q7_8};
use qfix_matrix::{DeterminantMethod, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    #[value(name = "q7.8")]
    Q7_8,
    #[value(name = "q21.10")]
    Q21_10,
    #[value(name = "q15.16")]
    Q15_16,
    #[value(name = "q31.32")]
    Q31_32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Method {
    PivotedLu,
    Laplace,
}

impl From<Method> for DeterminantMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::PivotedLu => DeterminantMethod::PivotedLu,
            Method::Laplace => DeterminantMethod::Laplace,
        }
    }
}

/// Fixed-point arithmetic and linear algebra without floating point
///
/// Prints the chosen Q format, a few scalar kernels, then decomposes,
/// inverts and measures a random square matrix.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Q format for every computation
    #[arg(long, value_enum, default_value_t = Format::Q15_16)]
    format: Format,

    /// Side length of the random matrix
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Seed for the random matrix
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Determinant algorithm
    #[arg(long, value_enum, default_value_t = Method::PivotedLu)]
    method: Method,

    /// Print the format summary as JSON and exit
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.format {
        Format::Q7_8 => run::<Q7_8>(&args),
        Format::Q21_10 => run::<Q21_10>(&args),
        Format::Q15_16 => run::<Q15_16>(&args),
        Format::Q31_32 => run::<Q31_32>(&args),
    }
}

fn run<Q: QFormat>(args: &Args) -> Result<()> {
    let info = Fixed::<Q>::format_info();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("=== Fixed-Point Format ===\n");
    println!("{}\n", info);

    scalar_showcase::<Q>()?;
    matrix_showcase::<Q>(args)
}

fn scalar_showcase<Q: QFormat>() -> Result<()> {
    println!("=== Scalar Kernels ===\n");

    let a = Fixed::<Q>::from_float(2.5);
    let b = Fixed::<Q>::from_float(-0.75);
    println!("  a = {}, b = {}", a, b);
    println!("  a + b        = {}", a + b);
    println!("  a * b        = {}", a * b);
    println!("  a / b        = {}", a.divide(b)?);
    println!("  |b|          = {}", b.absolute());
    println!("  a^3          = {}", a.int_power(3)?);
    println!("  a^-2         = {}", a.int_power(-2)?);
    println!("  sqrt(a)      = {}", a.sqrt()?);

    let angle = Fixed::<Q>::pi().multiply(Fixed::from_float(0.25));
    println!("  sin(pi/4)    = {}", angle.sin());
    println!("  cos(pi/4)    = {}", angle.cos());
    println!("  tan(pi/4)    = {}", angle.tan());
    println!("  tan(pi/2)    = {} (singularity sentinel)", Fixed::<Q>::half_pi().tan());

    if let Err(e) = a.divide(Fixed::zero()) {
        println!("  a / 0        -> {}", e);
    }
    println!();
    Ok(())
}

fn matrix_showcase<Q: QFormat>(args: &Args) -> Result<()> {
    let n = args.size;
    let method = DeterminantMethod::from(args.method);
    if method == DeterminantMethod::Laplace && n > 8 {
        warn!("Laplace expansion on a {}x{} matrix is O(n!)", n, n);
    }

    println!("=== Linear Algebra ({}x{}, seed {}) ===\n", n, n, args.seed);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut a = Matrix::<Q>::square(n).context("allocating matrix")?;
    a.fill_random_f64(&mut rng, -10.0, 10.0)?;
    println!("A = {}", a);

    let plu = match a.plu() {
        Ok(plu) => plu,
        Err(e) => {
            println!("PLU failed: {}", e);
            return Ok(());
        }
    };
    println!("P = {}", plu.p);
    println!("L = {}", plu.l);
    println!("U = {}", plu.u);
    let tol = Fixed::<Q>::from_float(0.5);
    println!("P^T*L*U ~= A: {}\n", plu.reconstruct()?.is_approx(&a, tol));

    let det = a.determinant_with(method)?;
    println!("det(A) [{}] = {}", method, det);
    println!("trace(A)    = {}", a.trace()?);
    println!("||A||_1     = {}", a.norm_one());
    println!("||A||_inf   = {}", a.norm_inf());
    match a.norm_euclidean() {
        Ok(e) => println!("||A||_F     = {}\n", e),
        Err(e) => println!("||A||_F     -> {}\n", e),
    }

    let inv = a.inverse().context("inverting A")?;
    println!("A^-1 = {}", inv);
    let identity = Matrix::<Q>::identity(n)?;
    let product = a.dot(&inv)?;
    let status = product.is_approx(&identity, Fixed::from_float(0.1));
    println!("A*A^-1 ~= I: {}", status);
    info!("demo finished with status {}", status);
    Ok(())
}
