//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs arithmétiques attendues (division par zéro, NaN, infini)
//! - invariant clé : toute valeur rendue a une échelle <= échelle max

use std::time::{Duration, Instant};

use super::config::ConfigEval;
use super::decimal::{Arrondi, Decimal};
use super::erreur::ErreurCalcul;
use super::eval::eval_expression;
use super::variables::Variables;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Liste blanche : erreurs *normales* sur des expressions bien formées.
    matches!(
        e,
        ErreurCalcul::DivisionParZero | ErreurCalcul::ResultatNaN | ErreurCalcul::NombreInfini
    )
}

fn variables_fuzz() -> Variables {
    let mut vars = Variables::new();
    vars.insert("x".into(), Decimal::from(3));
    vars.insert("y".into(), "-0.5".parse().unwrap_or_default());
    vars.insert("taux_1".into(), "0.07".parse().unwrap_or_default());
    vars
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits nombres, incluant 0 (utile pour les divisions par zéro)
    let a = rng.pick(10);
    match rng.pick(3) {
        0 => format!("{a}"),
        1 => format!("{a}.{}", rng.pick(100)),
        _ => format!("0.{a}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "x".to_string(),
        4 => "-y".to_string(),
        5 => "taux_1".to_string(),
        _ => format!("(-{})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 || rng.pick(4) == 0 {
        return gen_atom(rng);
    }

    let op = match rng.pick(5) {
        0 => "+",
        1 => "-",
        2 => "*",
        3 => "/",
        _ => "^",
    };
    let a = gen_expr(rng, depth - 1);
    let b = if op == "^" {
        // exposant borné : évite les débordements systématiques
        gen_atom(rng)
    } else {
        gen_expr(rng, depth - 1)
    };

    if rng.coin() {
        format!("({a}{op}{b})")
    } else {
        format!("{a} {op} {b}")
    }
}

fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[u8] = b"0123456789.+-*/^() xyzE_$";
    let n = rng.pick(24) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize] as char)
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let vars = variables_fuzz();
    let config = ConfigEval::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr, Some(&vars), &config) {
            Ok((v, _d)) => {
                assert!(v.scale() <= config.echelle_max(), "expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    // Même seed => mêmes expressions => mêmes sorties
    let tirage = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        let vars = variables_fuzz();
        let config = ConfigEval::new(6, Arrondi::HalfUp).unwrap_or_default();
        (0..80)
            .map(|_| {
                let expr = gen_expr(&mut rng, 3);
                match eval_expression(&expr, Some(&vars), &config) {
                    Ok((v, d)) => format!("{expr} => {v} [{}]", d.rpn),
                    Err(e) => format!("{expr} => {e}"),
                }
            })
            .collect()
    };

    let a = tirage(0xBADC0DE_u64);
    budget(t0, max);
    let b = tirage(0xBADC0DE_u64);
    budget(t0, max);

    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0x5EED_u64);
    let vars = variables_fuzz();
    let config = ConfigEval::default();

    for _ in 0..500 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        // seul compte : pas de panique, et une valeur rendue respecte l’échelle
        if let Ok((v, _d)) = eval_expression(&expr, Some(&vars), &config) {
            assert!(v.scale() <= config.echelle_max(), "expr={expr:?} v={v}");
        }
    }
}
