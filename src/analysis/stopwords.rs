//! Default stop-word lists, one per supported language.

use crate::analysis::language::Language;

/// Default stop words for a language.
pub fn stop_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::Danish => DANISH,
        Language::Dutch => DUTCH,
        Language::English => ENGLISH,
        Language::Finnish => FINNISH,
        Language::French => FRENCH,
        Language::German => GERMAN,
        Language::Italian => ITALIAN,
        Language::Norwegian => NORWEGIAN,
        Language::Portuguese => PORTUGUESE,
        Language::Russian => RUSSIAN,
        Language::Spanish => SPANISH,
        Language::Swedish => SWEDISH,
    }
}

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "isn't", "it", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over",
    "own", "same", "shan't", "she", "should", "shouldn't", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "were", "weren't", "what", "when", "where", "which", "while", "who", "whom", "why", "with",
    "won't", "would", "wouldn't", "you", "your", "yours", "yourself", "yourselves",
];

const DANISH: &[&str] = &[
    "af", "alle", "andet", "andre", "at", "begge", "da", "de", "den", "denne", "der", "deres",
    "det", "dette", "dig", "din", "dog", "du", "ej", "eller", "en", "end", "ene", "eneste",
    "enhver", "et", "fem", "fire", "flere", "fra", "før", "god", "han", "hans", "har", "her",
    "hun", "hvad", "hvem", "hver", "hvilken", "hvis", "hvor", "hvordan", "hvorfor", "i", "jeg",
    "jeres", "kan", "kom", "kunne", "man", "mand", "med", "meget", "men", "mig", "min", "mod",
    "ny", "nogen", "noget", "nu", "når", "og", "også", "om", "op", "os", "over", "på", "se",
    "skal", "som", "til", "to", "ud", "var", "vi", "vil",
];

const DUTCH: &[&str] = &[
    "aan", "al", "alles", "als", "altijd", "andere", "ben", "bij", "daar", "dan", "dat", "de",
    "der", "deze", "die", "dit", "doch", "doen", "door", "dus", "een", "eens", "en", "er", "ge",
    "geen", "geweest", "haar", "had", "heb", "hebben", "heeft", "hem", "het", "hier", "hij",
    "hoe", "hun", "iemand", "iets", "ik", "in", "is", "ja", "je", "kan", "kon", "kunnen", "maar",
    "me", "meer", "men", "met", "mij", "mijn", "moet", "na", "naar", "niet", "niets", "nog",
    "nu", "of", "om", "omdat", "onder", "ons", "ook", "op", "over", "reeds", "te", "tegen",
    "toch", "toen", "tot", "u", "uit", "uw", "van", "veel", "voor", "want", "waren", "was",
    "wat", "werd", "wezen", "wie", "wil", "worden", "wordt", "zal", "ze", "zelf", "zich", "zij",
    "zijn", "zo", "zonder", "zou",
];

const FINNISH: &[&str] = &[
    "ei", "en", "et", "ette", "että", "he", "hän", "itse", "ja", "johon", "joka", "jonka",
    "jos", "jossa", "jota", "kanssa", "keitä", "ketkä", "koska", "kuin", "kuinka", "kun",
    "me", "mihin", "mikä", "miksi", "minä", "missä", "mistä", "mitkä", "mitä", "mukaan",
    "mutta", "ne", "niin", "nyt", "näin", "oli", "olla", "on", "ovat", "sekä", "sillä", "sinä",
    "siten", "tai", "te", "tämä", "vaan", "vain", "voi",
];

const FRENCH: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux",
    "il", "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me", "même", "mes",
    "moi", "mon", "ne", "nos", "notre", "nous", "on", "ou", "par", "pas", "pour", "qu", "que",
    "qui", "sa", "se", "ses", "son", "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une",
    "vos", "votre", "vous", "y", "été", "étée", "étés", "étant", "suis", "es", "est", "sommes",
    "êtes", "sont", "serai", "seras", "sera", "serons", "serez", "seront",
];

const GERMAN: &[&str] = &[
    "aber", "alle", "als", "also", "am", "an", "auch", "auf", "aus", "bei", "bin", "bis", "bist",
    "da", "damit", "dann", "das", "dass", "dein", "dem", "den", "der", "des", "dich", "die",
    "dir", "doch", "du", "durch", "ein", "eine", "einem", "einen", "einer", "eines", "er", "es",
    "euer", "eure", "für", "hatte", "hatten", "hattest", "hattet", "hier", "hinter", "ich",
    "ihr", "ihre", "im", "in", "ist", "ja", "jede", "jedem", "jeden", "jeder", "jedes", "jener",
    "jetzt", "kann", "kannst", "können", "könnt", "machen", "mein", "meine", "mit", "muss",
    "musst", "müssen", "müsst", "nach", "nachdem", "nein", "nicht", "nun", "oder", "seid",
    "sein", "seine", "sich", "sie", "sind", "soll", "sollen", "sollst", "sollt", "sonst",
    "soweit", "sowie", "und", "unser", "unsere", "unter", "vom", "von", "vor", "wann", "warum",
    "was", "weiter", "weitere", "wenn", "wer", "werde", "werden", "werdet", "weshalb", "wie",
    "wieder", "wieso", "wir", "wird", "wirst", "wo", "woher", "wohin", "zu", "zum", "zur",
    "über",
];

const ITALIAN: &[&str] = &[
    "a", "ad", "agli", "ai", "al", "alla", "alle", "allo", "anche", "c", "che", "chi", "ci",
    "come", "con", "contro", "cui", "da", "dagli", "dai", "dal", "dalla", "dalle", "dallo",
    "degli", "dei", "del", "della", "delle", "dello", "di", "dove", "e", "ed", "era", "erano",
    "essere", "fra", "gli", "ha", "hai", "hanno", "ho", "i", "il", "in", "io", "l", "la", "le",
    "lei", "li", "lo", "loro", "lui", "ma", "mi", "mia", "mie", "miei", "mio", "ne", "negli",
    "nei", "nel", "nella", "nelle", "nello", "noi", "non", "nostra", "nostre", "nostri",
    "nostro", "o", "per", "perché", "più", "quale", "quanto", "quella", "quelle", "quelli",
    "quello", "questa", "queste", "questi", "questo", "se", "sei", "si", "sia", "siamo", "siete",
    "sono", "sta", "su", "sugli", "sui", "sul", "sulla", "sulle", "sullo", "tra", "tu", "tua",
    "tue", "tuo", "tuoi", "tutti", "tutto", "un", "una", "uno", "vi", "voi", "vostra", "vostre",
    "vostri", "vostro", "è",
];

const NORWEGIAN: &[&str] = &[
    "at", "av", "bare", "begge", "ble", "blei", "bli", "blir", "blitt", "både", "båe", "da",
    "de", "deg", "dei", "deim", "deira", "deires", "dem", "den", "denne", "der", "dere",
    "deres", "det", "dette", "di", "din", "disse", "ditt", "du", "eg", "ein", "eit", "eitt",
    "eller", "elles", "en", "enn", "er", "et", "ett", "etter", "for", "fordi", "fra", "før",
    "ha", "hadde", "han", "hans", "har", "hennar", "henne", "hennes", "her", "hjå", "ho",
    "hoe", "honom", "hoss", "hossen", "hun", "hva", "hvem", "hver", "hvilke", "hvilken",
    "hvis", "hvor", "hvordan", "hvorfor", "i", "ikke", "ikkje", "ingen", "ingi", "inkje",
    "inn", "inni", "ja", "jeg", "kan", "kom", "korleis", "korso", "kun", "kunne", "kva",
    "kvar", "kvarhelst", "kven", "kvi", "kvifor", "man", "mange", "me", "med", "medan", "meg",
    "meget", "mellom", "men", "mi", "min", "mine", "mitt", "mot", "mykje", "ned", "no", "noe",
    "noen", "noka", "noko", "nokon", "nokor", "nokre", "nå", "når", "og", "også", "om", "opp",
    "oss", "over", "på", "samme", "seg", "selv", "si", "sia", "sidan", "siden", "sin", "sine",
    "sitt", "sjøl", "skal", "skulle", "slik", "so", "som", "somme", "somt", "så", "sånn", "til",
    "um", "upp", "ut", "uten", "var", "vart", "varte", "ved", "vere", "verte", "vi", "vil",
    "ville", "vore", "vors", "vort", "vår", "være", "vært", "å",
];

const PORTUGUESE: &[&str] = &[
    "a", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "até", "com",
    "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do", "dos", "e",
    "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "essa", "essas", "esse",
    "esses", "esta", "estas", "este", "estes", "eu", "foi", "foram", "há", "isso", "isto",
    "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu", "meus", "minha", "minhas",
    "muito", "na", "nas", "nem", "no", "nos", "nossa", "nossas", "nosso", "nossos", "num",
    "numa", "não", "nós", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos", "por",
    "qual", "quando", "que", "quem", "se", "sem", "seu", "seus", "sua", "suas", "são", "só",
    "também", "te", "tem", "teu", "teus", "tu", "tua", "tuas", "um", "uma", "você", "vocês",
    "vos", "à", "às", "é",
];

const RUSSIAN: &[&str] = &[
    "а", "без", "более", "бы", "был", "была", "были", "было", "быть", "в", "вам", "вас",
    "весь", "во", "вот", "все", "всего", "всех", "вы", "где", "да", "даже", "для", "до",
    "его", "ее", "если", "есть", "еще", "же", "за", "здесь", "и", "из", "или", "им", "их",
    "к", "как", "ко", "когда", "кто", "ли", "либо", "мне", "может", "мы", "на", "надо",
    "наш", "не", "него", "нее", "нет", "ни", "них", "но", "ну", "о", "об", "однако", "он",
    "она", "они", "оно", "от", "очень", "по", "под", "при", "с", "со", "так", "также",
    "такой", "там", "те", "тем", "то", "того", "тоже", "той", "только", "том", "ты", "у",
    "уже", "хотя", "чего", "чей", "чем", "что", "чтобы", "чье", "чья", "эта", "эти", "это",
    "я",
];

const SPANISH: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "como", "con", "contra", "cual",
    "cuando", "de", "del", "desde", "donde", "durante", "e", "el", "ella", "ellas", "ellos",
    "en", "entre", "era", "erais", "eran", "eras", "eres", "es", "esa", "esas", "ese", "eso",
    "esos", "esta", "estas", "este", "esto", "estos", "fue", "fueron", "fui", "fuimos", "ha",
    "han", "hasta", "hay", "la", "las", "le", "les", "lo", "los", "me", "mi", "mis", "mucho",
    "muchos", "muy", "más", "mí", "nada", "ni", "no", "nos", "nosotras", "nosotros", "nuestra",
    "nuestras", "nuestro", "nuestros", "o", "os", "otra", "otras", "otro", "otros", "para",
    "pero", "poco", "por", "porque", "que", "quien", "quienes", "qué", "se", "sea", "sean",
    "según", "si", "sido", "siendo", "sin", "sobre", "sois", "somos", "son", "soy", "su",
    "sus", "sí", "también", "tanto", "te", "tenéis", "tenemos", "tener", "tengo", "ti",
    "tiene", "tienen", "toda", "todas", "todo", "todos", "tu", "tus", "tú", "un", "una",
    "uno", "unos", "vosotras", "vosotros", "vuestra", "vuestras", "vuestro", "vuestros", "y",
    "ya", "yo", "él", "ésta", "éstas", "éste", "éstos",
];

const SWEDISH: &[&str] = &[
    "alla", "allt", "att", "av", "blev", "bli", "blir", "blivit", "de", "dem", "den", "denna",
    "deras", "dess", "dessa", "det", "detta", "dig", "din", "dina", "ditt", "du", "där", "då",
    "efter", "ej", "eller", "en", "er", "era", "ert", "ett", "från", "för", "ha", "hade",
    "han", "hans", "har", "henne", "hennes", "hon", "honom", "hur", "här", "i", "icke",
    "ingen", "inom", "inte", "jag", "ju", "kan", "kunde", "man", "med", "mellan", "men",
    "mig", "min", "mina", "mitt", "mot", "mycket", "ni", "nu", "när", "någon", "något",
    "några", "och", "om", "oss", "på", "samma", "sedan", "sig", "sin", "sina", "sitta",
    "själv", "skulle", "som", "så", "sådan", "sådana", "sådant", "till", "under", "upp",
    "ut", "utan", "vad", "var", "vara", "varför", "varit", "varje", "vars", "vart", "vem",
    "vi", "vid", "vilka", "vilken", "vilket", "vår", "våra", "vårt", "än", "är", "åt",
    "över",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_list() {
        for language in crate::analysis::language::SUPPORTED_LANGUAGES {
            assert!(!stop_words(language).is_empty(), "{}", language);
        }
    }

    #[test]
    fn english_contains_the_usual_suspects() {
        let words = stop_words(Language::English);
        for w in ["the", "a", "and", "of"] {
            assert!(words.contains(&w), "missing '{}'", w);
        }
        assert!(!words.contains(&"quick"));
    }
}
