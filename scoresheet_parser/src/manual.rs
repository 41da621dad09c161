/*!

This is the long-form manual for `scoresheet_parser` and `sheetocr`.

## Scoresheet types

Two layouts are supported, and the layout must be given: it is never guessed.
* `electronic` machine-printed sheets. This is the default.
* `manuscript` handwritten sheets, including the Swiss two-column variant.

### `electronic`

The OCR text is read as a table. Each row carries the number, the name and the
license of a player of team A, then the same for team B, separated by tabs:

```text
VBC Heimteam	VBC Gastteam
N.	Name of the player	License	N.	Name of the player	License
1	MÜLLER ANNA	OK	3	SCHMIDT LISA	OK
LIBERO
7 MEIER SARA	OK	9 GERBER JANA	OK
OFFICIAL MEMBERS ADMITTED ON THE BENCH
C	HANS MUSTER	C	PETER BEISPIEL
SIGNATURES
```

The team names are searched in the three lines above the header row. Without
header row, the first line that starts with a number and an uppercase name is
the first player row, and the line above it holds the team names.

The sections (players, libero, officials) are announced by marker lines, and
everything after the signatures is ignored.

When a row only has three cells, the player belongs to one of the teams but the
text alone cannot tell which. If the word boxes of the OCR engine are available
(see `ocr_json` below), the row goes to the team of the column it was printed
in. Otherwise it goes to team A, and a warning is added to the sheet.

### `manuscript`

Handwritten sheets are read one line at a time. The blocks of the teams start
with `Team A`, `Équipe A`, `Mannschaft A` or `Home` (and `B`, `Away`, `Gast`
for the second team). Without these markers, the first line that looks like a
team name starts team A, and the next one starts team B.

```text
Team A: VBC Bern
1 MEIER Anna 12.03.98
2. KELLER Eva
C: Hans Muster
Team B: TV Muri
7 FREI Mia
```

Players are written `LASTNAME Firstname`, officials `Firstname Lastname`. A line
`Officials` or `Coach` switches to the officials: the names that follow get the
roles `C`, `AC`, `AC2`, ... in that order.

The Swiss sheets are recognized from their headers in German, French and
Italian (`Name / Nom / Nome`, `Geburtsdatum / Date de naissance / Data di
nascita`...). The team names are taken after the club prefixes (`VBC`, `TV`,
`STV`...), and at most 14 players are read per team.

## Official roles

The roles `C` (coach) and `AC` to `AC4` (assistant coaches) are accepted by
default. The role `M` (medical staff) is dropped unless it is added to the
accepted roles, for instance with `--official-roles C,AC,AC2,AC3,AC4,M`.
Until then, a handwritten line such as `M. Keller` is read as a name.

## Input formats

* `text` the plain text returned by the OCR engine
* `ocr_json` the text and the recognized lines with their word boxes:

```json
{
  "text": "VBC Heimteam\tVBC Gastteam\n...",
  "lines": [
    {
      "text": "12 KELLER EVA OK",
      "words": [
        { "text": "12", "confidence": 91.2, "bbox": { "x0": 420, "y0": 310, "x1": 440, "y1": 330 } }
      ]
    }
  ]
}
```

The key `fullText` is accepted in place of `text`. When the text is not a string,
the sheet is parsed as empty.

## Rosters

A roster is the list of the people expected in a team. When a roster is given,
the people read on the sheet are compared with it, and each of them is reported
as:
* `match` the person was found in the roster
* `ocr-only` the person is on the sheet but not in the roster
* `roster-only` the person is in the roster but was not found on the sheet

Names are compared without case or accents, in any order of first and last
names. The minimal similarity of a match is 0.85 and can be changed with
`--threshold`.

Rosters can be read from:
* `json` an array of `{ "id": ..., "displayName": ..., "firstName": ..., "lastName": ... }`
* `csv` a file with the columns `id`, `displayName` (or `name`), `firstName`, `lastName`
* `xlsx` the same columns, on the first worksheet or on the worksheet given by
  `--excel-worksheet-name`

## Configuration file

All the options can also be provided in a JSON file, passed with `--config`.
The paths are relative to the directory of this file.

```json
{
  "ocrSource": { "provider": "ocr_json", "filePath": "sheet.json" },
  "scoresheetType": "manuscript",
  "rosterSources": [
    { "team": "A", "provider": "csv", "filePath": "bern.csv" },
    { "team": "A", "kind": "officials", "provider": "json", "filePath": "bern_staff.json" }
  ],
  "rules": { "officialRoles": ["C", "AC", "M"], "matchThreshold": 0.9 },
  "outputSettings": { "outputPath": "result.json" }
}
```

The options given on the command line take precedence over the file.

*/
