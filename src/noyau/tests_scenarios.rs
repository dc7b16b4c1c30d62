//! Tests scénarios (campagne) : cas de référence + invariants + limites contrôlées.
//!
//! Notes importantes (alignées avec l’état actuel du noyau) :
//! - La table de priorité est historique : '+' (3) lie plus fort que '-' (2),
//!   '*' (5) plus fort que '/' (4). "5-2+1" vaut donc 2, "8/2*2" vaut 2.
//!   Ces valeurs sont figées ici exprès : toute “correction” casserait des
//!   expressions déjà enregistrées.
//! - La puissance passe par un f64 : on ne teste que des valeurs exactement
//!   représentables ou des arrondis connus.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::config::ConfigEval;
use super::decimal::{Arrondi, Decimal};
use super::erreur::ErreurCalcul;
use super::expression::Expression;
use super::variables::{parse_variables, Variables};

fn eval_ok(expr: &str) -> Decimal {
    Expression::new(expr)
        .and_then(|e| e.evaluate())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_valeur(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr).to_string(), attendu, "expr={expr:?}");
}

fn assert_valeur_avec(expr: &str, vars: &str, attendu: &str) {
    let vars = parse_variables(vars).unwrap_or_else(|e| panic!("vars={vars:?} err={e}"));
    let v = Expression::new(expr)
        .and_then(|e| e.evaluate_with(&vars))
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(v.to_string(), attendu, "expr={expr:?}");
}

fn erreur(expr: &str, vars: &Variables) -> ErreurCalcul {
    match Expression::new(expr).and_then(|e| e.evaluate_with(vars)) {
        Ok(v) => panic!("attendu une erreur pour {expr:?}, obtenu {v}"),
        Err(e) => e,
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Cas de référence ------------------------ */

#[test]
fn sc_cas_de_reference() {
    assert_valeur("2+3*4", "14");
    assert_valeur("2^10", "1024");
    assert_valeur("(2+3)*4", "20");
    assert_valeur_avec("x+y", "x=3; y=4", "7");
    assert_valeur_avec("-x", "x=5", "-5");

    let e = Expression::with_scale("10/4", 2, Arrondi::HalfEven).unwrap();
    assert_eq!(e.evaluate().unwrap().to_string(), "2.5");
}

#[test]
fn sc_erreurs_de_reference() {
    let vide = Variables::new();
    assert_eq!(erreur("10/0", &vide), ErreurCalcul::DivisionParZero);
    assert!(matches!(erreur("x+1", &vide), ErreurCalcul::ExpressionInvalide(_)));
    assert!(matches!(erreur("(1+2", &vide), ErreurCalcul::ExpressionInvalide(_)));
}

/* ------------------------ Priorités historiques ------------------------ */

#[test]
fn sc_priorites_historiques_figees() {
    // 5 - (2 + 1), pas (5 - 2) + 1
    assert_valeur("5-2+1", "2");
    // 8 / (2 * 2), pas (8 / 2) * 2
    assert_valeur("8/2*2", "2");
    // sens “normal” : mêmes résultats que l’arithmétique usuelle
    assert_valeur("5+2-1", "6");
    assert_valeur("10-2-3", "5");
    assert_valeur("2*3/4", "1.5");
    // '^' sort sur égalité : (2^3)^2
    assert_valeur("2^3^2", "64");
    // les parenthèses rétablissent l’ordre voulu
    assert_valeur("(5-2)+1", "4");
}

/* ------------------------ Signes ------------------------ */

#[test]
fn sc_signes_et_variables() {
    assert_valeur_avec("--x", "x=5", "5");
    assert_valeur_avec("2*-x", "x=5", "-10");
    assert_valeur_avec("(-x)^2", "x=3", "9");
    assert_valeur_avec("a-b", "a=1.25; b=-0.75", "2");
    assert_valeur_avec("Prix*Qte_2", "Prix=19.99; Qte_2=3", "59.97");
    assert_valeur("-3+-2", "-5");
    assert_valeur("4--2", "6");
}

#[test]
fn sc_variables_sensibles_a_la_casse() {
    let vars = parse_variables("x=1").unwrap();
    assert!(matches!(erreur("X", &vars), ErreurCalcul::ExpressionInvalide(_)));
}

/* ------------------------ Échelle / arrondis ------------------------ */

#[test]
fn sc_echelle_bornee_pour_chaque_mode() {
    for arrondi in Arrondi::TOUS.into_iter().filter(|a| *a != Arrondi::Unnecessary) {
        for echelle in [1, 2, 7, 14, 32] {
            let config = ConfigEval::new(echelle, arrondi).unwrap();
            for expr in ["1/7", "-2/3", "2^0.5", "1.23456789*9.87654321", "(1/3)*(1/3)"] {
                let e = Expression::with_config(expr, config).unwrap();
                let v = e.evaluate().unwrap();
                assert!(
                    v.scale() <= echelle,
                    "expr={expr:?} echelle={echelle} arrondi={arrondi} v={v}"
                );
            }
        }
    }
}

#[test]
fn sc_arrondi_final_selon_le_mode() {
    let cas = [
        (Arrondi::HalfEven, "0.12"),
        (Arrondi::HalfUp, "0.13"),
        (Arrondi::HalfDown, "0.12"),
        (Arrondi::Up, "0.13"),
        (Arrondi::Down, "0.12"),
        (Arrondi::Ceiling, "0.13"),
        (Arrondi::Floor, "0.12"),
    ];
    for (arrondi, attendu) in cas {
        // 0.5 * 0.25 = 0.125 exact, puis ramené à 2 chiffres
        let e = Expression::with_scale("0.5*0.25", 2, arrondi).unwrap();
        assert_eq!(e.evaluate().unwrap().to_string(), attendu, "{arrondi}");
    }
}

#[test]
fn sc_echelle_32() {
    let e = Expression::with_scale("1/3", 32, Arrondi::HalfEven).unwrap();
    assert_eq!(
        e.evaluate().unwrap().to_string(),
        "0.33333333333333333333333333333333"
    );
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sc_evaluations_repetees_identiques() {
    let vars = parse_variables("r=2.5; h=1.2").unwrap();
    let e = Expression::new("3.14159*r^2*h/3").unwrap();
    let premiere = e.evaluate_with(&vars).unwrap();
    for _ in 0..20 {
        let v = e.evaluate_with(&vars).unwrap();
        assert_eq!(v.to_string(), premiere.to_string());
        assert_eq!(v.unscaled(), premiere.unscaled());
        assert_eq!(v.scale(), premiere.scale());
    }
}

/* ------------------------ Stress (borné) ------------------------ */

#[test]
fn sc_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["0.5"; 2000].join("+");
    budget(t0, max);
    assert_valeur(&expr, "1000");
    budget(t0, max);
}

#[test]
fn sc_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let n = 500;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    assert_valeur(&expr, "501");
    budget(t0, max);
}
