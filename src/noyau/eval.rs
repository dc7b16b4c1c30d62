//! Noyau — évaluation (pipeline réel)
//!
//! normalize -> contrôle des parenthèses -> jetons -> RPN -> pile d’évaluation -> Decimal
//!
//! Chaque appel travaille sur ses propres piles : rien n’est partagé entre deux
//! évaluations, une même RPN peut être évaluée depuis plusieurs fils.

use log::{debug, trace};

use super::config::ConfigEval;
use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{format_tokens, tokenize, Tok};
use super::normalise::normalize;
use super::rpn::to_rpn;
use super::variables::Variables;

/// Trace lisible du pipeline (affichée par l’interface).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub canon: String,
    pub jetons: String,
    pub rpn: String,
}

/// Compte '(' et ')' dans la forme canonique, avant tout calcul.
pub fn check_parentheses(canon: &str) -> Resultat<()> {
    let ouvrantes = canon.matches('(').count();
    let fermantes = canon.matches(')').count();
    if ouvrantes != fermantes {
        return Err(ErreurCalcul::invalide(format!(
            "parenthèses déséquilibrées : {ouvrantes} '(' pour {fermantes} ')'"
        )));
    }
    Ok(())
}

/// Puissance : calcul en f64 puis relecture exacte du texte du flottant.
/// La précision est donc celle d’un double, pas plus.
fn puissance(base: &Decimal, exposant: &Decimal) -> Resultat<Decimal> {
    let x = base.to_f64().powf(exposant.to_f64());
    Decimal::from_f64_text(x)
}

/// a op b ; zéros finaux retirés.
fn applique(op: &Tok, a: &Decimal, b: &Decimal, config: &ConfigEval) -> Resultat<Decimal> {
    let r = match op {
        Tok::Minus => a - b,
        Tok::Plus => a + b,
        Tok::Slash => a.checked_div(b, config.echelle_max(), config.arrondi())?,
        Tok::Star => a * b,
        Tok::Caret => puissance(a, b)?,
        _ => return Err(ErreurCalcul::invalide(format!("opérateur inattendu : '{op}'"))),
    };
    Ok(r.strip_trailing_zeros())
}

/// Évalue une RPN.
///
/// - RPN vide => 0
/// - variable absente de `vars` (ou `vars` absent) => expression invalide
/// - opérateur sans ses deux opérandes, ou opérandes en trop à la fin => expression invalide
/// - résultat final ramené à `echelle_max` chiffres au plus (mode d’arrondi de `config`)
pub fn eval_rpn(rpn: &[Tok], vars: Option<&Variables>, config: &ConfigEval) -> Resultat<Decimal> {
    if rpn.is_empty() {
        return Ok(Decimal::zero());
    }

    // pile de lecture : RPN inversée, le premier jeton au sommet
    let mut lecture: Vec<&Tok> = rpn.iter().rev().collect();
    let mut pile: Vec<Decimal> = Vec::with_capacity(rpn.len());

    while let Some(tok) = lecture.pop() {
        match tok {
            Tok::Num(texte) => pile.push(texte.parse()?),

            Tok::Var { nom, negatif } => {
                let v = vars
                    .and_then(|m| m.get(nom))
                    .ok_or_else(|| ErreurCalcul::invalide(format!("variable inconnue : '{nom}'")))?;
                pile.push(if *negatif { -v.clone() } else { v.clone() });
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::invalide("parenthèse inattendue en RPN"))
            }

            op => {
                let manque =
                    || ErreurCalcul::invalide(format!("opérande manquant pour '{op}'"));
                // le premier dépilé est l’opérande de droite
                let b = pile.pop().ok_or_else(manque)?;
                let a = pile.pop().ok_or_else(manque)?;
                let r = applique(op, &a, &b, config)?;
                trace!("{a} {op} {b} = {r}");
                pile.push(r);
            }
        }
    }

    let resultat = pile
        .pop()
        .ok_or_else(|| ErreurCalcul::invalide("aucune valeur calculée"))?;
    if !pile.is_empty() {
        return Err(ErreurCalcul::invalide(format!(
            "{} opérande(s) sans opérateur",
            pile.len()
        )));
    }

    let resultat = if resultat.scale() > config.echelle_max() {
        resultat.with_scale(config.echelle_max(), config.arrondi())?
    } else {
        resultat
    };

    Ok(resultat.strip_trailing_zeros())
}

/// Contrôle des parenthèses, RPN puis évaluation, à partir de jetons déjà lus.
pub(crate) fn evalue_jetons(
    canon: &str,
    jetons: &[Tok],
    vars: Option<&Variables>,
    config: &ConfigEval,
) -> Resultat<(Decimal, Vec<Tok>)> {
    check_parentheses(canon)?;
    let rpn = to_rpn(jetons)?;
    let valeur = eval_rpn(&rpn, vars, config)?;
    debug!("eval: {canon:?} = {valeur}");
    Ok((valeur, rpn))
}

/// API publique : évalue une expression texte et retourne:
/// - la valeur exacte (échelle <= echelle_max)
/// - la démarche (forme canonique, jetons, RPN)
pub fn eval_expression(
    expr_str: &str,
    vars: Option<&Variables>,
    config: &ConfigEval,
) -> Resultat<(Decimal, Demarche)> {
    let canon = normalize(expr_str);
    check_parentheses(&canon)?;
    let jetons = tokenize(&canon)?;
    let (valeur, rpn) = evalue_jetons(&canon, &jetons, vars, config)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        canon,
    };

    Ok((valeur, d))
}
