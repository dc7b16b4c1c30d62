// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
//
// Table de priorité (plus grand = lie plus fort / sort plus tard) :
//   '(' 1   '-' 2   '+' 3   '/' 4   '*' 5   '^' 6
//
// Attention : '+' et '-' n’ont PAS la même priorité, ni '*' et '/'.
// Un opérateur ne fait sortir que les opérateurs de priorité >= la sienne :
//   "5-2+1" -> "5 2 1 + -" = 2   (et non 4)
//   "8/2*2" -> "8 2 2 * /" = 2   (et non 8)
// C’est le comportement historique des expressions déjà enregistrées : on le garde tel quel.
//
// Pas de cas “associatif à droite” : '^' sort aussi sur égalité ("2^3^2" = 64).

use log::debug;

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{format_tokens, Tok};

/// Priorité d’un opérateur ou de '(' ; None pour tout autre jeton.
pub fn priorite(t: &Tok) -> Option<u8> {
    match t {
        Tok::LPar => Some(1),
        Tok::Minus => Some(2),
        Tok::Plus => Some(3),
        Tok::Slash => Some(4),
        Tok::Star => Some(5),
        Tok::Caret => Some(6),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [LPar, Num(2), Plus, Num(3), RPar, Star, Num(4)]
///   rpn:    [Num(2), Num(3), Plus, Num(4), Star]
///
/// Les parenthèses n’apparaissent jamais dans la sortie ; une parenthèse
/// orpheline (d’un côté ou de l’autre) est une expression invalide.
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Var { .. } => out.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => loop {
                match ops.pop() {
                    Some(Tok::LPar) => break,
                    Some(op) => out.push(op),
                    None => {
                        return Err(ErreurCalcul::invalide("parenthèse fermante sans ouvrante"))
                    }
                }
            },

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let p_tok = priorite(&tok).unwrap_or(0);

                // '(' (priorité 1) fait barrière : aucun opérateur n’a une priorité <= 1
                while let Some(top) = ops.last() {
                    if priorite(top).unwrap_or(0) < p_tok {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::invalide("parenthèse ouvrante non fermée"));
        }
        out.push(op);
    }

    debug!("to_rpn: {}", format_tokens(&out));
    Ok(out)
}
