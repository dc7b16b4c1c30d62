// src/noyau/normalise.rs
//
// Normalisation du texte brut en forme canonique “un jeton par mot”.
//
// Étapes (dans cet ordre) :
//   1) supprime tous les blancs
//   2) "--" -> "+"
//   3) "++" -> "+"   (jusqu’à disparition)
//   4) "+-" -> "-"   (idem)
//   5) "-+" -> "-"   (idem)
//   6) "()" -> ""    (idem)
//   7) espaces autour de ^ * / + - ( ) ; un +/- en tête, après un opérateur
//      ou après '(' est un signe et reste collé à l’opérande qui suit.
//
// Les étapes 2..6 sont rejouées jusqu’à stabilité : retirer "()" peut recréer
// une suite de signes ("2-()-3"). Sans ça, normalize ne serait pas idempotente.
//
// Aucune erreur ici : une forme mal construite échoue plus tard (jetons / RPN / éval).

use log::trace;

/// Opérateurs et parenthèses : les seuls caractères qui séparent les jetons.
fn est_symbole(c: char) -> bool {
    matches!(c, '^' | '*' | '/' | '+' | '-' | '(' | ')')
}

fn remplace_tant_que(s: &mut String, motif: &str, par: &str) {
    while s.contains(motif) {
        *s = s.replace(motif, par);
    }
}

/// Un passage des étapes 2..6.
fn reduit_signes(s: &str) -> String {
    let mut t = s.replace("--", "+");
    remplace_tant_que(&mut t, "++", "+");
    remplace_tant_que(&mut t, "+-", "-");
    remplace_tant_que(&mut t, "-+", "-");
    remplace_tant_que(&mut t, "()", "");
    t
}

/// Étape 7 : découpe en morceaux, signes unaires collés.
fn espacer(t: &str) -> String {
    let mut morceaux: Vec<String> = Vec::new();
    let mut courant = String::new();

    // vrai en tête, après un opérateur ou '(' : un +/- y est un signe
    let mut attend_operande = true;

    for c in t.chars() {
        if !est_symbole(c) {
            courant.push(c);
            attend_operande = false;
            continue;
        }

        if (c == '+' || c == '-') && attend_operande {
            courant.push(c);
            continue;
        }

        if !courant.is_empty() {
            morceaux.push(std::mem::take(&mut courant));
        }
        morceaux.push(c.to_string());
        attend_operande = c != ')';
    }

    if !courant.is_empty() {
        morceaux.push(courant);
    }

    morceaux.join(" ")
}

/// Texte brut -> forme canonique (jetons séparés par un seul espace).
pub fn normalize(brut: &str) -> String {
    let mut t: String = brut.chars().filter(|c| !c.is_whitespace()).collect();

    loop {
        let r = reduit_signes(&t);
        if r == t {
            break;
        }
        t = r;
    }

    let canon = espacer(&t);
    trace!("normalize: {brut:?} -> {canon:?}");
    canon
}
