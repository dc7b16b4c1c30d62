// src/noyau/jetons.rs

use std::fmt;

use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};

/// Noms qu’un lecteur de flottants prendrait pour des nombres : interdits comme variables.
const NOMS_RESERVES: [&str; 2] = ["NaN", "Infinity"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Littéral décimal, gardé tel qu’écrit (signe compris).
    Num(String),

    /// Variable, signe(s) préfixe(s) réduit(s) à un seul booléen.
    Var { nom: String, negatif: bool },

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(texte) => f.write_str(texte),
            Tok::Var { nom, negatif: true } => write!(f, "-{nom}"),
            Tok::Var { nom, negatif: false } => f.write_str(nom),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Caret => f.write_str("^"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/// `[+-]*[A-Za-z][A-Za-z0-9_]*`, hors noms réservés.
fn classe_variable(mot: &str) -> Option<Tok> {
    let nom = mot.trim_start_matches(['+', '-']);
    let signes = &mot[..mot.len() - nom.len()];

    let mut chars = nom.chars();
    let premier = chars.next()?;
    if !premier.is_ascii_alphabetic() || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    if NOMS_RESERVES.contains(&nom) {
        return None;
    }

    let negatif = signes.matches('-').count() % 2 == 1;
    Some(Tok::Var {
        nom: nom.to_string(),
        negatif,
    })
}

fn classe(mot: &str) -> Resultat<Tok> {
    let tok = match mot {
        "+" => Tok::Plus,
        "-" => Tok::Minus,
        "*" => Tok::Star,
        "/" => Tok::Slash,
        "^" => Tok::Caret,
        "(" => Tok::LPar,
        ")" => Tok::RPar,
        _ if mot.parse::<Decimal>().is_ok() => Tok::Num(mot.to_string()),
        _ => classe_variable(mot)
            .ok_or_else(|| ErreurCalcul::invalide(format!("jeton inattendu : '{mot}'")))?,
    };
    Ok(tok)
}

/// Découpe une forme canonique (voir `normalize`) sur les blancs et classe chaque mot.
///
/// Un mot qui n’est ni nombre, ni variable, ni opérateur, ni parenthèse
/// fait échouer toute la tokenisation.
pub fn tokenize(canon: &str) -> Resultat<Vec<Tok>> {
    canon.split_whitespace().map(classe).collect()
}

/// Format utilitaire (affichage / démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
