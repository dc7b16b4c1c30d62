// src/noyau/decimal.rs
//
// Décimal exact à précision arbitraire : un entier “scalé” + une échelle.
//   valeur = entier / 10^echelle
//
// - Échelle toujours >= 0 (on ne descend jamais sous l’unité : 1024, pas 1.024E+3).
// - Arrondis : on passe par BigRational pour décider exactement du côté où tomber.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreur::{ErreurCalcul, Resultat};

/// Garde-fou : exposant décimal maximal accepté dans un littéral (1e4096).
const EXPOSANT_MAX: i64 = 4096;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/* ------------------------ Modes d’arrondi ------------------------ */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arrondi {
    /// Loin de zéro.
    Up,
    /// Vers zéro (troncature).
    Down,
    /// Vers +∞.
    Ceiling,
    /// Vers −∞.
    Floor,
    HalfUp,
    HalfDown,
    /// Au plus proche, égalité vers le pair (arrondi bancaire).
    #[default]
    HalfEven,
    /// Aucun arrondi permis : échoue si la valeur n’est pas exacte.
    Unnecessary,
}

impl Arrondi {
    pub const TOUS: [Arrondi; 8] = [
        Arrondi::HalfEven,
        Arrondi::HalfUp,
        Arrondi::HalfDown,
        Arrondi::Up,
        Arrondi::Down,
        Arrondi::Ceiling,
        Arrondi::Floor,
        Arrondi::Unnecessary,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Arrondi::Up => "up",
            Arrondi::Down => "down",
            Arrondi::Ceiling => "ceiling",
            Arrondi::Floor => "floor",
            Arrondi::HalfUp => "half-up",
            Arrondi::HalfDown => "half-down",
            Arrondi::HalfEven => "half-even",
            Arrondi::Unnecessary => "unnecessary",
        }
    }
}

impl fmt::Display for Arrondi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

impl FromStr for Arrondi {
    type Err = ErreurCalcul;

    /// Accepte "half-even", "HALF_EVEN", "Half_Even"...
    fn from_str(s: &str) -> Resultat<Self> {
        let cle = s.trim().to_ascii_lowercase().replace('_', "-");
        Arrondi::TOUS
            .into_iter()
            .find(|a| a.nom() == cle)
            .ok_or_else(|| ErreurCalcul::ConfigInvalide(format!("mode d’arrondi inconnu : '{s}'")))
    }
}

/// Arrondit un rationnel à l’entier selon `arrondi`.
fn arrondir(r: &BigRational, arrondi: Arrondi) -> Resultat<BigInt> {
    let tronque = r.trunc();
    let reste = r - &tronque;
    let base = tronque.to_integer();

    if reste.is_zero() {
        return Ok(base);
    }

    // l’entier voisin “loin de zéro”
    let loin = if r.is_negative() {
        &base - BigInt::one()
    } else {
        &base + BigInt::one()
    };

    let choix = match arrondi {
        Arrondi::Up => loin,
        Arrondi::Down => base,
        Arrondi::Ceiling => {
            if r.is_positive() {
                loin
            } else {
                base
            }
        }
        Arrondi::Floor => {
            if r.is_negative() {
                loin
            } else {
                base
            }
        }
        Arrondi::HalfUp | Arrondi::HalfDown | Arrondi::HalfEven => {
            let demi = BigRational::new(BigInt::one(), BigInt::from(2));
            match reste.abs().cmp(&demi) {
                Ordering::Greater => loin,
                Ordering::Less => base,
                Ordering::Equal => match arrondi {
                    Arrondi::HalfUp => loin,
                    Arrondi::HalfDown => base,
                    _ => {
                        if (&base % BigInt::from(2)).is_zero() {
                            base
                        } else {
                            loin
                        }
                    }
                },
            }
        }
        Arrondi::Unnecessary => {
            return Err(ErreurCalcul::ConfigInvalide(
                "arrondi nécessaire mais interdit (unnecessary)".into(),
            ))
        }
    };

    Ok(choix)
}

/* ------------------------ Décimal ------------------------ */

#[derive(Clone, Debug)]
pub struct Decimal {
    valeur: BigInt,
    echelle: u32,
}

impl Decimal {
    pub fn new(valeur: BigInt, echelle: u32) -> Self {
        Self { valeur, echelle }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    /// Nombre de chiffres après la virgule.
    pub fn scale(&self) -> u32 {
        self.echelle
    }

    /// Entier “scalé” (valeur × 10^échelle).
    pub fn unscaled(&self) -> &BigInt {
        &self.valeur
    }

    pub fn is_zero(&self) -> bool {
        self.valeur.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.valeur.is_negative()
    }

    /// Entier scalé ré-exprimé à une échelle plus grande (exact).
    fn aligne(&self, echelle: u32) -> BigInt {
        debug_assert!(echelle >= self.echelle);
        &self.valeur * pow10(echelle - self.echelle)
    }

    /// Retire les zéros finaux de la partie décimale (jamais sous l’échelle 0).
    pub fn strip_trailing_zeros(mut self) -> Self {
        if self.valeur.is_zero() {
            return Self::zero();
        }
        let dix = BigInt::from(10);
        while self.echelle > 0 && (&self.valeur % &dix).is_zero() {
            self.valeur /= &dix;
            self.echelle -= 1;
        }
        self
    }

    pub fn to_rational(&self) -> BigRational {
        BigRational::new(self.valeur.clone(), pow10(self.echelle))
    }

    /// r arrondi à `echelle` chiffres décimaux.
    pub fn from_rational(r: &BigRational, echelle: u32, arrondi: Arrondi) -> Resultat<Self> {
        let scaled = r * BigRational::from_integer(pow10(echelle));
        Ok(Self::new(arrondir(&scaled, arrondi)?, echelle))
    }

    /// Change l’échelle : exact si elle augmente, arrondi sinon.
    pub fn with_scale(&self, echelle: u32, arrondi: Arrondi) -> Resultat<Self> {
        if echelle >= self.echelle {
            return Ok(Self::new(self.aligne(echelle), echelle));
        }
        Self::from_rational(&self.to_rational(), echelle, arrondi)
    }

    /// self / diviseur, résultat à `echelle` chiffres (arrondi selon `arrondi`).
    pub fn checked_div(&self, diviseur: &Decimal, echelle: u32, arrondi: Arrondi) -> Resultat<Self> {
        if diviseur.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        let q = self.to_rational() / diviseur.to_rational();
        Self::from_rational(&q, echelle, arrondi)
    }

    /// Valeur flottante la plus proche (via le texte décimal).
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Reconstruit un décimal exact depuis le texte d’un f64.
    /// NaN et ±∞ n’ont pas de forme décimale : erreurs dédiées.
    pub fn from_f64_text(x: f64) -> Resultat<Self> {
        if x.is_nan() {
            return Err(ErreurCalcul::ResultatNaN);
        }
        if x.is_infinite() {
            return Err(ErreurCalcul::NombreInfini);
        }
        let texte = x.to_string();
        texte.strip_suffix(".0").unwrap_or(&texte).parse()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}

/* ------------------------ Lecture / affichage ------------------------ */

impl FromStr for Decimal {
    type Err = ErreurCalcul;

    /// Littéral décimal : `[+-]?(d+(.d*)?|.d+)([eE][+-]?d+)?`
    fn from_str(s: &str) -> Resultat<Self> {
        let err = || ErreurCalcul::invalide(format!("nombre invalide : '{s}'"));

        let (neg, reste) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };

        let (mantisse, exposant) = match reste.find(['e', 'E']) {
            Some(i) => (&reste[..i], Some(&reste[i + 1..])),
            None => (reste, None),
        };

        let (entier, frac) = mantisse.split_once('.').unwrap_or((mantisse, ""));
        if entier.is_empty() && frac.is_empty() {
            return Err(err());
        }
        let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if !chiffres_ok(entier) || !chiffres_ok(frac) {
            return Err(err());
        }

        let exp: i64 = match exposant {
            None => 0,
            Some(e) => e.parse().map_err(|_| err())?,
        };
        if exp.abs() > EXPOSANT_MAX {
            return Err(ErreurCalcul::invalide(format!("exposant hors bornes : '{s}'")));
        }

        let chiffres = format!("{entier}{frac}");
        let mut valeur = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(err)?;
        if neg {
            valeur = -valeur;
        }

        // frac.len() est borné par la longueur du texte : pas de débordement en i64
        let echelle = frac.len() as i64 - exp;
        if echelle < 0 {
            valeur *= pow10((-echelle) as u32);
            return Ok(Self::new(valeur, 0));
        }
        let echelle = u32::try_from(echelle).map_err(|_| err())?;
        Ok(Self::new(valeur, echelle))
    }
}

impl fmt::Display for Decimal {
    /// Écriture décimale simple, sans notation scientifique.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signe = if self.valeur.is_negative() { "-" } else { "" };
        let mut chiffres = self.valeur.abs().to_str_radix(10);

        if self.echelle == 0 {
            return write!(f, "{signe}{chiffres}");
        }

        let echelle = self.echelle as usize;
        while chiffres.len() <= echelle {
            chiffres.insert(0, '0');
        }
        let (int_part, frac_part) = chiffres.split_at(chiffres.len() - echelle);
        write!(f, "{signe}{int_part}.{frac_part}")
    }
}

/* ------------------------ Comparaison (numérique) ------------------------ */

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let e = self.echelle.max(other.echelle);
        self.aligne(e).cmp(&other.aligne(e))
    }
}

/* ------------------------ Arithmétique exacte ------------------------ */

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Decimal {
        let e = self.echelle.max(rhs.echelle);
        Decimal::new(self.aligne(e) + rhs.aligne(e), e)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Decimal {
        let e = self.echelle.max(rhs.echelle);
        Decimal::new(self.aligne(e) - rhs.aligne(e), e)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Self) -> Decimal {
        Decimal::new(&self.valeur * &rhs.valeur, self.echelle + rhs.echelle)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.valeur, self.echelle)
    }
}
